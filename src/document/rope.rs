//! Rope storage for the editor buffer
//!
//! Offsets are byte offsets into the UTF-8 text. Callers must pass offsets
//! that lie on `char` boundaries; leaves are always split on boundaries so a
//! leaf never holds a partial code point.

use std::fmt;

/// Target leaf size in bytes when building from a string
const MAX_LEAF_SIZE: usize = 1024;

/// Rope of UTF-8 text
#[derive(Clone, Default)]
pub struct Rope {
    root: RopeNode,
}

#[derive(Clone, Default)]
enum RopeNode {
    Branch {
        left: Box<RopeNode>,
        right: Box<RopeNode>,
        /// Bytes in the left subtree
        left_weight: usize,
        /// Newlines in the left subtree
        left_newlines: usize,
    },
    Leaf {
        text: String,
        newlines: usize,
    },
    #[default]
    Empty,
}

fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count()
}

/// Largest char boundary in `text` that is `<= index`
fn floor_boundary(text: &str, mut index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

impl Rope {
    /// Create an empty rope
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a balanced rope holding `text`
    pub fn from_text(text: &str) -> Self {
        let mut leaves = Vec::with_capacity(text.len() / MAX_LEAF_SIZE + 1);
        let mut rest = text;
        while !rest.is_empty() {
            let mut cut = floor_boundary(rest, MAX_LEAF_SIZE);
            if cut == 0 {
                cut = rest.len();
            }
            let (head, tail) = rest.split_at(cut);
            leaves.push(RopeNode::leaf(head.to_string()));
            rest = tail;
        }

        Self {
            root: Self::build_tree(leaves),
        }
    }

    fn build_tree(mut nodes: Vec<RopeNode>) -> RopeNode {
        while nodes.len() > 1 {
            let mut paired = Vec::with_capacity(nodes.len().div_ceil(2));
            let mut iter = nodes.into_iter();
            while let Some(left) = iter.next() {
                match iter.next() {
                    Some(right) => paired.push(RopeNode::branch(left, right)),
                    None => paired.push(left),
                }
            }
            nodes = paired;
        }
        nodes.pop().unwrap_or_default()
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `\n` characters
    pub fn newline_count(&self) -> usize {
        self.root.newlines()
    }

    /// Insert `text` at byte `offset` (clamped to the end)
    pub fn insert(&mut self, offset: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let offset = offset.min(self.len());
        self.root = Self::insert_node(std::mem::take(&mut self.root), offset, text);
        self.rebalance_if_needed();
    }

    fn insert_node(node: RopeNode, offset: usize, new_text: &str) -> RopeNode {
        match node {
            RopeNode::Empty => RopeNode::leaf(new_text.to_string()),
            RopeNode::Leaf { mut text, newlines } => {
                if text.len() + new_text.len() <= MAX_LEAF_SIZE {
                    text.insert_str(offset.min(text.len()), new_text);
                    return RopeNode::Leaf {
                        newlines: newlines + count_newlines(new_text),
                        text,
                    };
                }
                let new_node = RopeNode::leaf(new_text.to_string());
                if offset == 0 {
                    RopeNode::branch(new_node, RopeNode::Leaf { text, newlines })
                } else if offset >= text.len() {
                    RopeNode::branch(RopeNode::Leaf { text, newlines }, new_node)
                } else {
                    let (head, tail) = text.split_at(offset);
                    let left = RopeNode::branch(RopeNode::leaf(head.to_string()), new_node);
                    RopeNode::branch(left, RopeNode::leaf(tail.to_string()))
                }
            }
            RopeNode::Branch {
                left,
                right,
                left_weight,
                left_newlines,
            } => {
                if offset <= left_weight {
                    let left = Self::insert_node(*left, offset, new_text);
                    RopeNode::branch(left, *right)
                } else {
                    let right = Self::insert_node(*right, offset - left_weight, new_text);
                    RopeNode::Branch {
                        left,
                        right: Box::new(right),
                        left_weight,
                        left_newlines,
                    }
                }
            }
        }
    }

    /// Delete the byte range `start..end` (clamped to the end)
    pub fn delete(&mut self, start: usize, end: usize) {
        let end = end.min(self.len());
        if start >= end {
            return;
        }
        self.root = Self::delete_range(std::mem::take(&mut self.root), start, end);
        self.rebalance_if_needed();
    }

    fn delete_range(node: RopeNode, start: usize, end: usize) -> RopeNode {
        match node {
            RopeNode::Empty => RopeNode::Empty,
            RopeNode::Leaf { mut text, .. } => {
                let end = end.min(text.len());
                text.replace_range(start..end, "");
                if text.is_empty() {
                    RopeNode::Empty
                } else {
                    RopeNode::leaf(text)
                }
            }
            RopeNode::Branch {
                left,
                right,
                left_weight,
                ..
            } => {
                if end <= left_weight {
                    let left = Self::delete_range(*left, start, end);
                    RopeNode::join(left, *right)
                } else if start >= left_weight {
                    let right = Self::delete_range(*right, start - left_weight, end - left_weight);
                    RopeNode::join(*left, right)
                } else {
                    let left = Self::delete_range(*left, start, left_weight);
                    let right = Self::delete_range(*right, 0, end - left_weight);
                    RopeNode::join(left, right)
                }
            }
        }
    }

    /// Copy out the byte range `start..end`
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        let mut out = String::with_capacity(end.saturating_sub(start));
        self.root.collect_range(start, end, &mut out);
        out
    }

    /// Number of newlines before byte `offset`, i.e. the line it is on
    pub fn line_of(&self, offset: usize) -> usize {
        self.root.newlines_before(offset.min(self.len()))
    }

    /// Byte offset where line `line` (0-based) starts, clamped to the end
    pub fn line_start(&self, line: usize) -> usize {
        if line == 0 {
            return 0;
        }
        if line > self.newline_count() {
            return self.len();
        }
        self.root.after_newline(line)
    }

    /// Iterate over the leaf strings in order
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks {
            stack: vec![&self.root],
        }
    }

    /// Rebuild from scratch once the tree gets much deeper than a balanced
    /// one of the same size. Rebuilding also coalesces small leaves.
    fn rebalance_if_needed(&mut self) {
        let leaves_estimate = self.len() / MAX_LEAF_SIZE + 1;
        let optimal_height = leaves_estimate.ilog2() as usize + 1;
        if self.root.height() > optimal_height * 2 + 8 {
            let text = self.to_string();
            *self = Self::from_text(&text);
        }
    }
}

impl From<&str> for Rope {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl RopeNode {
    fn leaf(text: String) -> Self {
        let newlines = count_newlines(&text);
        RopeNode::Leaf { text, newlines }
    }

    fn branch(left: RopeNode, right: RopeNode) -> Self {
        RopeNode::Branch {
            left_weight: left.len(),
            left_newlines: left.newlines(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Join two subtrees, dropping empty sides
    fn join(left: RopeNode, right: RopeNode) -> Self {
        match (left, right) {
            (RopeNode::Empty, right) => right,
            (left, RopeNode::Empty) => left,
            (left, right) => RopeNode::branch(left, right),
        }
    }

    fn len(&self) -> usize {
        match self {
            RopeNode::Empty => 0,
            RopeNode::Leaf { text, .. } => text.len(),
            RopeNode::Branch {
                left_weight, right, ..
            } => left_weight + right.len(),
        }
    }

    fn newlines(&self) -> usize {
        match self {
            RopeNode::Empty => 0,
            RopeNode::Leaf { newlines, .. } => *newlines,
            RopeNode::Branch {
                left_newlines,
                right,
                ..
            } => left_newlines + right.newlines(),
        }
    }

    fn height(&self) -> usize {
        match self {
            RopeNode::Empty | RopeNode::Leaf { .. } => 1,
            RopeNode::Branch { left, right, .. } => 1 + left.height().max(right.height()),
        }
    }

    fn newlines_before(&self, offset: usize) -> usize {
        match self {
            RopeNode::Empty => 0,
            RopeNode::Leaf { text, .. } => text.as_bytes()[..offset.min(text.len())]
                .iter()
                .filter(|b| **b == b'\n')
                .count(),
            RopeNode::Branch {
                left,
                right,
                left_weight,
                left_newlines,
            } => {
                if offset <= *left_weight {
                    left.newlines_before(offset)
                } else {
                    left_newlines + right.newlines_before(offset - left_weight)
                }
            }
        }
    }

    /// Offset just past the `nth` newline (1-based); caller guarantees it exists
    fn after_newline(&self, nth: usize) -> usize {
        match self {
            RopeNode::Empty => 0,
            RopeNode::Leaf { text, .. } => text
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .nth(nth - 1)
                .map_or(text.len(), |(i, _)| i + 1),
            RopeNode::Branch {
                left,
                right,
                left_weight,
                left_newlines,
            } => {
                if nth <= *left_newlines {
                    left.after_newline(nth)
                } else {
                    left_weight + right.after_newline(nth - left_newlines)
                }
            }
        }
    }

    fn collect_range(&self, start: usize, end: usize, out: &mut String) {
        if start >= end {
            return;
        }
        match self {
            RopeNode::Empty => {}
            RopeNode::Leaf { text, .. } => {
                let s = start.min(text.len());
                let e = end.min(text.len());
                if s < e {
                    out.push_str(&text[s..e]);
                }
            }
            RopeNode::Branch {
                left,
                right,
                left_weight,
                ..
            } => {
                if start < *left_weight {
                    left.collect_range(start, end.min(*left_weight), out);
                }
                if end > *left_weight {
                    right.collect_range(start.saturating_sub(*left_weight), end - left_weight, out);
                }
            }
        }
    }
}

/// In-order iterator over rope leaves
pub struct Chunks<'a> {
    stack: Vec<&'a RopeNode>,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while let Some(node) = self.stack.pop() {
            match node {
                RopeNode::Empty => {}
                RopeNode::Leaf { text, .. } => return Some(text.as_str()),
                RopeNode::Branch { left, right, .. } => {
                    self.stack.push(right);
                    self.stack.push(left);
                }
            }
        }
        None
    }
}

impl fmt::Display for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rope({:?})", self.to_string())
    }
}
