//! Stack-of-frames symbol directory used during semantic analysis.
//!
//! Each frame holds the symbols declared in one lexical region, in
//! declaration order. Lookups walk from the innermost frame outward and,
//! within a frame, prefer the latest declaration, so inner names shadow
//! outer ones.

use tracing::trace;

use crate::{ast::types::DataType, Position};

/// What introduced a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    Variable,
    Parameter,
    Function,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    /// Depth of the frame the symbol was declared in, the outermost being 0
    pub depth: usize,
    pub declaration: Declaration,
    pub data_type: DataType,
    pub position: Position,
}

/// Index of a symbol inside the table, valid until its frame is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolId {
    frame: usize,
    index: usize,
}

#[derive(Debug)]
pub struct ScopeTable {
    frames: Vec<Vec<Symbol>>,
}

impl ScopeTable {
    /// Creates a table holding just the outermost frame.
    pub fn new() -> Self {
        ScopeTable {
            frames: vec![vec![]],
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn open_scope(&mut self) {
        self.frames.push(vec![]);
        trace!("opened scope at depth {}", self.depth());
    }

    /// Drops every symbol declared at the current depth. The outermost frame
    /// is never closed.
    pub fn close_scope(&mut self) {
        if self.frames.len() > 1 {
            let dropped = self.frames.pop().map(|frame| frame.len()).unwrap_or(0);
            trace!(
                "closed scope at depth {}, dropped {} symbols",
                self.depth() + 1,
                dropped
            );
        }
    }

    pub fn declare(
        &mut self,
        name: &str,
        declaration: Declaration,
        data_type: DataType,
        position: Position,
    ) -> SymbolId {
        let depth = self.depth();
        let frame = &mut self.frames[depth];

        trace!("declared {:?} `{}` as {} at depth {}", declaration, name, data_type, depth);
        frame.push(Symbol {
            name: name.to_string(),
            depth,
            declaration,
            data_type,
            position,
        });

        SymbolId {
            frame: depth,
            index: frame.len() - 1,
        }
    }

    /// Updates the recorded type of a symbol that is still in scope.
    pub fn redefine(&mut self, id: SymbolId, data_type: DataType) {
        if let Some(symbol) = self
            .frames
            .get_mut(id.frame)
            .and_then(|frame| frame.get_mut(id.index))
        {
            symbol.data_type = data_type;
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.iter().rev().find(|symbol| symbol.name == name))
    }
}

impl Default for ScopeTable {
    fn default() -> Self {
        ScopeTable::new()
    }
}
