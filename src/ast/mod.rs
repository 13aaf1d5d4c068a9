/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The node type, node kinds and analyzer annotations
/// - printer: Preorder text dump of a tree
/// - types: The inferred type lattice
pub mod ast;
pub mod printer;
pub mod types;
