//! Hierarchical table of contents built from headings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOfContentsItem {
    pub title: String,
    pub url: String,
    pub level: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<TableOfContentsItem>,
}

impl TableOfContentsItem {
    pub fn new(title: impl Into<String>, slug: &str, level: u8) -> Self {
        Self {
            title: title.into(),
            url: format!("#{}", slug),
            level,
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TableOfContents {
    pub items: Vec<TableOfContentsItem>,
}

/// Position of the most recent level-2 node.
#[derive(Debug, Clone, Copy)]
enum Level2 {
    TopLevel(usize),
    UnderLevel1(usize, usize),
}

/// Attaches headings, in document order, to the most recently opened
/// level-1 or level-2 node.
#[derive(Debug, Default)]
pub struct TocBuilder {
    toc: TableOfContents,
    level1: Option<usize>,
    level2: Option<Level2>,
}

impl TocBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a heading. Levels outside 1..=3 are ignored.
    pub fn push(&mut self, item: TableOfContentsItem) {
        match item.level {
            1 => {
                self.toc.items.push(item);
                self.level1 = Some(self.toc.items.len() - 1);
                self.level2 = None;
            }
            2 => {
                self.level2 = Some(match self.level1 {
                    Some(l1) => {
                        let children = &mut self.toc.items[l1].items;
                        children.push(item);
                        Level2::UnderLevel1(l1, children.len() - 1)
                    }
                    None => {
                        self.toc.items.push(item);
                        Level2::TopLevel(self.toc.items.len() - 1)
                    }
                });
            }
            3 => {
                let parent = match (self.level2, self.level1) {
                    (Some(Level2::TopLevel(i)), _) => &mut self.toc.items[i].items,
                    (Some(Level2::UnderLevel1(l1, i)), _) => &mut self.toc.items[l1].items[i].items,
                    (None, Some(l1)) => &mut self.toc.items[l1].items,
                    (None, None) => &mut self.toc.items,
                };
                parent.push(item);
            }
            _ => {}
        }
    }

    pub fn finish(self) -> TableOfContents {
        self.toc
    }
}
