use tracing::{debug, warn};

use crate::{
    ast::{
        ast::{Bound, ForBounds, Node, NodeKind},
        types::DataType,
    },
    errors::errors::{Error, ErrorImpl, Failure, Stage},
    Position,
};

use super::scope::{Declaration, ScopeTable};

/// Functions every program can call without declaring them, with the type
/// each one returns.
pub const BUILTINS: [(&str, DataType); 8] = [
    ("hacer_menjunje", DataType::None),
    ("viene_bolita", DataType::Text),
    ("trome", DataType::Number),
    ("sueltele", DataType::None),
    ("echandi_jiménez", DataType::Text),
    ("grítele", DataType::Text),
    ("susúrrele", DataType::Text),
    ("déjelo_parejo", DataType::Number),
];

/// Walks the tree once, resolving names and annotating every node with its
/// inferred type.
#[derive(Debug)]
pub struct TypeChecker {
    scopes: ScopeTable,
    errors: Vec<Error>,
    /// Types of the control values of the switches being checked, innermost last
    switch_controls: Vec<DataType>,
}

impl TypeChecker {
    pub fn new() -> Self {
        let mut scopes = ScopeTable::new();
        for (name, data_type) in BUILTINS {
            scopes.declare(name, Declaration::Function, data_type, Position::null());
        }

        TypeChecker {
            scopes,
            errors: vec![],
            switch_controls: vec![],
        }
    }

    pub fn get_errors(&self) -> &[Error] {
        &self.errors
    }

    fn diagnose(&mut self, error_impl: ErrorImpl, position: Position, text: impl Into<String>) {
        let error = Error::new(error_impl, position, text);
        warn!("{}", error);
        self.errors.push(error);
    }

    /// Checks `node` and its subtree and records the inferred type on it.
    ///
    /// Recoverable problems are collected; the returned error is always a
    /// fatal fault.
    pub fn check(&mut self, node: &mut Node) -> Result<DataType, Error> {
        let data_type = match node.kind {
            NodeKind::Program => self.check_children(node).map(|_| DataType::None)?,
            NodeKind::Assignment => self.check_assignment(node)?,
            NodeKind::MathExpression | NodeKind::Expression => {
                self.check_children(node)?;
                DataType::Number
            }
            NodeKind::FunctionDef => self.check_function_def(node)?,
            NodeKind::Invocation => self.check_invocation(node)?,
            NodeKind::FunctionParams => self.check_function_params(node)?,
            NodeKind::CallParams => self.check_children(node).map(|_| DataType::None)?,
            NodeKind::Statement => self.check(node.child_mut(0)?)?,
            NodeKind::Loop | NodeKind::IfBranch => self.in_scope(|checker| {
                checker.check(node.child_mut(0)?)?;
                checker.check(node.child_mut(1)?)
            })?,
            NodeKind::ElseBranch | NodeKind::MainEntry => self.check_scoped(node.child_mut(0)?)?,
            NodeKind::Conditional => self.check_children(node).map(|_| DataType::Any)?,
            NodeKind::LogicalConnector => DataType::Boolean,
            NodeKind::Condition => self.check_children(node).map(|_| DataType::Boolean)?,
            NodeKind::Comparison => self.check_comparison(node)?,
            NodeKind::Return => match node.children.first_mut() {
                Some(value) => self.check(value)?,
                None => DataType::None,
            },
            NodeKind::RaiseError => self.check_children(node).map(|_| DataType::None)?,
            NodeKind::Block => self.check_block(node)?,
            NodeKind::BinaryOperator => DataType::Number,
            // Set by the enclosing comparison
            NodeKind::Comparator => node.data_type().unwrap_or(DataType::Any),
            NodeKind::BooleanLiteral => DataType::Boolean,
            NodeKind::TextLiteral => DataType::Text,
            NodeKind::IntLiteral | NodeKind::FloatLiteral => DataType::Number,
            NodeKind::Identifier => self.check_identifier(node)?,
            NodeKind::SwitchCase => self.check_switch_case(node)?,
            NodeKind::CaseArm => self.check_case_arm(node)?,
            NodeKind::ForLoop => self.check_for_loop(node)?,
            NodeKind::TryCatch => {
                self.check_scoped(node.child_mut(0)?)?;
                self.check_scoped(node.child_mut(1)?)?;
                DataType::Any
            }
        };

        node.set_type(data_type);
        Ok(data_type)
    }

    fn check_children(&mut self, node: &mut Node) -> Result<(), Error> {
        for child in node.children.iter_mut() {
            self.check(child)?;
        }
        Ok(())
    }

    /// Runs `f` inside a fresh scope, closing it whatever the outcome.
    fn in_scope<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.scopes.open_scope();
        let result = f(self);
        self.scopes.close_scope();
        result
    }

    /// Checks `node` inside a scope of its own.
    fn check_scoped(&mut self, node: &mut Node) -> Result<DataType, Error> {
        self.in_scope(|checker| checker.check(node))
    }

    /// A block takes the type of its last statement that produces a value.
    fn check_block(&mut self, node: &mut Node) -> Result<DataType, Error> {
        let mut data_type = DataType::None;
        for statement in node.children.iter_mut() {
            let statement_type = self.check(statement)?;
            if !statement_type.is_none() {
                data_type = statement_type;
            }
        }
        Ok(data_type)
    }

    /// Every assignment declares its left-hand side anew, after the right-hand
    /// side has been checked.
    fn check_assignment(&mut self, node: &mut Node) -> Result<DataType, Error> {
        let data_type = self.check(node.child_mut(1)?)?;

        let target = node.child_mut(0)?;
        let name = target.get_content()?.to_string();
        self.scopes
            .declare(&name, Declaration::Variable, data_type, target.position);
        target.set_type(data_type);

        Ok(data_type)
    }

    fn check_identifier(&mut self, node: &mut Node) -> Result<DataType, Error> {
        let name = node.get_content()?.to_string();
        let symbol = self
            .scopes
            .lookup(&name)
            .map(|symbol| (symbol.declaration, symbol.data_type));

        match symbol {
            Some((Declaration::Parameter, _)) => Ok(DataType::Any),
            Some((_, data_type)) => Ok(data_type),
            None => {
                self.diagnose(
                    ErrorImpl::UndeclaredIdentifier {
                        identifier: name.clone(),
                    },
                    node.position,
                    name,
                );
                Ok(DataType::Any)
            }
        }
    }

    /// The function is declared before its body is checked so that it can
    /// call itself; its return type is filled in afterwards.
    fn check_function_def(&mut self, node: &mut Node) -> Result<DataType, Error> {
        let name = node.get_content()?.to_string();
        let id = self
            .scopes
            .declare(&name, Declaration::Function, DataType::Any, node.position);

        let data_type = self.in_scope(|checker| {
            checker.check(node.child_mut(1)?)?;
            checker.check(node.child_mut(2)?)
        })?;

        self.scopes.redefine(id, data_type);
        node.child_mut(0)?.set_type(data_type);

        Ok(data_type)
    }

    fn check_function_params(&mut self, node: &mut Node) -> Result<DataType, Error> {
        for param in node.children.iter_mut() {
            let name = param.get_content()?.to_string();
            self.scopes
                .declare(&name, Declaration::Parameter, DataType::Any, param.position);
            param.set_type(DataType::Any);
        }
        Ok(DataType::None)
    }

    fn check_invocation(&mut self, node: &mut Node) -> Result<DataType, Error> {
        let callee = node.child_mut(0)?;
        let name = callee.get_content()?.to_string();

        let symbol = self
            .scopes
            .lookup(&name)
            .map(|symbol| (symbol.declaration, symbol.data_type));

        let data_type = match symbol {
            None => {
                return Err(Error::new(
                    ErrorImpl::UndeclaredFunction {
                        function: name.clone(),
                    },
                    callee.position,
                    name,
                ))
            }
            Some((Declaration::Function, data_type)) => data_type,
            Some(_) => {
                let position = callee.position;
                self.diagnose(ErrorImpl::NotCallable, position, name);
                DataType::Any
            }
        };

        node.child_mut(0)?.set_type(data_type);
        self.check(node.child_mut(1)?)?;

        Ok(data_type)
    }

    fn check_comparison(&mut self, node: &mut Node) -> Result<DataType, Error> {
        let left_type = self.check(node.child_mut(0)?)?;
        let right_type = self.check(node.child_mut(2)?)?;

        let (comparison_type, comparator_type) = if left_type == right_type {
            (DataType::Boolean, left_type)
        } else if left_type.is_any() || right_type.is_any() {
            (DataType::Any, DataType::Any)
        } else {
            let left = node.child(0)?.get_content()?.to_string();
            let right = node.child(2)?.get_content()?.to_string();
            let comparator = node.child(1)?.get_content()?;
            let text = format!("{} {} {}", left, comparator, right);

            self.diagnose(
                ErrorImpl::IncompatibleComparison {
                    left,
                    left_type: left_type.to_string(),
                    right,
                    right_type: right_type.to_string(),
                },
                node.position,
                text,
            );
            (DataType::Any, DataType::Any)
        };

        node.child_mut(1)?.set_type(comparator_type);
        Ok(comparison_type)
    }

    fn check_switch_case(&mut self, node: &mut Node) -> Result<DataType, Error> {
        let control_type = self.check(node.child_mut(0)?)?;

        self.switch_controls.push(control_type);
        let arms = node
            .children
            .iter_mut()
            .skip(1)
            .try_for_each(|arm| self.check(arm).map(|_| ()));
        self.switch_controls.pop();
        arms?;

        Ok(DataType::Any)
    }

    /// Case values must have the switch's type unless either side is `ANY`.
    fn check_case_arm(&mut self, node: &mut Node) -> Result<DataType, Error> {
        let control_type = self
            .switch_controls
            .last()
            .copied()
            .unwrap_or(DataType::Any);

        self.in_scope(|checker| {
            let case_type = checker.check(node.child_mut(0)?)?;

            if case_type != control_type && !case_type.is_any() && !control_type.is_any() {
                let value = node.child(0)?;
                let (position, text) = (value.position, value.content.clone().unwrap_or_default());
                checker.diagnose(
                    ErrorImpl::CaseTypeMismatch {
                        case_type: case_type.to_string(),
                        control_type: control_type.to_string(),
                    },
                    position,
                    text,
                );
            }

            checker.check(node.child_mut(1)?)
        })
    }

    fn check_for_loop(&mut self, node: &mut Node) -> Result<DataType, Error> {
        self.in_scope(|checker| checker.check_children(node))?;

        node.annotations.range = Some(for_bounds(node)?);
        Ok(DataType::Any)
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        TypeChecker::new()
    }
}

/// Runs semantic analysis over a parsed tree, annotating it in place.
///
/// Every call starts from a fresh scope table, so analyzing an already
/// annotated tree again yields the same annotations.
pub fn analyze(ast: &mut Node) -> Result<(), Failure> {
    let mut type_checker = TypeChecker::new();

    type_checker.check(ast).map_err(|error| {
        warn!("analysis aborted: {}", error);
        Failure::fault(Stage::Analysis, error)
    })?;

    if !type_checker.errors.is_empty() {
        debug!(
            "analyzer found {} semantic errors",
            type_checker.errors.len()
        );
        return Err(Failure::batch(Stage::Analysis, type_checker.errors));
    }

    debug!("analysis finished without errors");
    Ok(())
}

/// Derives `range` arguments from a for-loop header.
///
/// - start: the initializer's value
/// - stop: the limit of the first comparison, adjusted by the comparator
/// - step: the increment's operand, negated for `quitele`; 1 for
///   `chuncherequee`, `desmadeje` or a plain reassignment
fn for_bounds(node: &Node) -> Result<ForBounds, Error> {
    let init = node.child(0)?;
    let variable = init.child(0)?.get_content()?.to_string();
    let start = value_bound(init.child(1)?);

    let step = step_bound(node.child(2)?.child(1)?, &variable)?;

    let comparison = node.child(1)?.child(0)?;
    let limit = comparison.child(2)?;
    let stop = match comparison.child(1)?.get_content()? {
        "menos o igualitico" | "misma vara" => shifted_bound(limit, 1),
        "más o igualitico" => shifted_bound(limit, -1),
        "otra vara" if is_negative(&step) => shifted_bound(limit, -1),
        "otra vara" => shifted_bound(limit, 1),
        _ => value_bound(limit),
    };

    Ok(ForBounds {
        variable,
        start,
        stop,
        step,
    })
}

fn step_bound(increment: &Node, variable: &str) -> Result<Bound, Error> {
    let expression = match (increment.kind, increment.children.first()) {
        (NodeKind::MathExpression, Some(inner)) if inner.is(NodeKind::Expression) => inner,
        _ => return Ok(Bound::Literal(1)),
    };

    let left = unwrap_math(expression.child(0)?);
    let right = unwrap_math(expression.child(2)?);
    let operand = if left.content.as_deref() == Some(variable) {
        right
    } else {
        left
    };

    Ok(match expression.child(1)?.get_content()? {
        "echele" => value_bound(operand),
        "quitele" => match int_value(operand).and_then(i64::checked_neg) {
            Some(value) => Bound::Literal(value),
            None => Bound::Negated(Box::new(unwrap_math(operand).clone())),
        },
        _ => Bound::Literal(1),
    })
}

/// Looks through a `MathExpression` that wraps a single number or name.
fn unwrap_math(node: &Node) -> &Node {
    match node.children.first() {
        Some(inner) if node.is(NodeKind::MathExpression) && inner.kind.is_value() => inner,
        _ => node,
    }
}

fn int_value(node: &Node) -> Option<i64> {
    let node = unwrap_math(node);
    if node.is(NodeKind::IntLiteral) {
        node.content.as_deref()?.parse().ok()
    } else {
        None
    }
}

fn value_bound(node: &Node) -> Bound {
    match int_value(node) {
        Some(value) => Bound::Literal(value),
        None => Bound::Value(Box::new(unwrap_math(node).clone())),
    }
}

fn shifted_bound(node: &Node, delta: i64) -> Bound {
    match int_value(node).and_then(|value| value.checked_add(delta)) {
        Some(value) => Bound::Literal(value),
        None => Bound::Offset(Box::new(unwrap_math(node).clone()), delta),
    }
}

fn is_negative(bound: &Bound) -> bool {
    match bound {
        Bound::Literal(value) => *value < 0,
        // A literal lands here only when it cannot be negated, so it is negative
        Bound::Negated(node) => !matches!(int_value(node), Some(value) if value < 0),
        _ => false,
    }
}
