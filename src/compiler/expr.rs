use crate::{
    ast::ast::{Bound, Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
};

/// Renders an expression-level node as Python text.
///
/// `nested` is set when the node is an operand of an enclosing arithmetic
/// expression, in which case a parenthesized sub-expression keeps its
/// parentheses.
pub fn gen_expression(node: &Node, nested: bool) -> Result<String, Error> {
    let text = match node.kind {
        NodeKind::IntLiteral
        | NodeKind::FloatLiteral
        | NodeKind::BooleanLiteral
        | NodeKind::Identifier => node.get_content()?.to_string(),
        NodeKind::TextLiteral => node.get_content()?.replace('~', "\""),
        NodeKind::MathExpression => {
            let inner = node.child(0)?;
            if inner.is(NodeKind::Expression) && nested {
                format!("({})", gen_expression(inner, false)?)
            } else {
                gen_expression(inner, false)?
            }
        }
        NodeKind::Expression => format!(
            "{} {} {}",
            gen_expression(node.child(0)?, true)?,
            gen_expression(node.child(1)?, false)?,
            gen_expression(node.child(2)?, true)?
        ),
        NodeKind::BinaryOperator | NodeKind::Comparator | NodeKind::LogicalConnector => {
            symbol_for(node)?.to_string()
        }
        NodeKind::Comparison => format!(
            "{} {} {}",
            gen_expression(node.child(0)?, false)?,
            gen_expression(node.child(1)?, false)?,
            gen_expression(node.child(2)?, false)?
        ),
        NodeKind::Condition => join(node, " ")?,
        NodeKind::Invocation => format!(
            "{}({})",
            node.child(0)?.get_content()?,
            gen_expression(node.child(1)?, false)?
        ),
        NodeKind::FunctionParams | NodeKind::CallParams => join(node, ", ")?,
        _ => {
            return Err(Error::new(
                ErrorImpl::MissingLowering {
                    node: node.kind.to_string(),
                },
                node.position,
                node.content.clone().unwrap_or_default(),
            ))
        }
    };

    Ok(text)
}

fn join(node: &Node, separator: &str) -> Result<String, Error> {
    Ok(node
        .children
        .iter()
        .map(|child| gen_expression(child, false))
        .collect::<Result<Vec<String>, Error>>()?
        .join(separator))
}

/// Maps operator, comparator and connector keywords onto Python.
fn symbol_for(node: &Node) -> Result<&'static str, Error> {
    let symbol = match node.get_content()? {
        "echele" => "+",
        "quitele" => "-",
        "chuncherequee" => "*",
        "desmadeje" => "/",
        "cañazo" => ">",
        "poquitico" => "<",
        "misma vara" => "==",
        "otra vara" => "!=",
        "menos o igualitico" => "<=",
        "más o igualitico" => ">=",
        "casorio" => "and",
        "divorcio" => "or",
        _ => {
            return Err(Error::new(
                ErrorImpl::MissingLowering {
                    node: node.kind.to_string(),
                },
                node.position,
                node.content.clone().unwrap_or_default(),
            ))
        }
    };
    Ok(symbol)
}

/// Renders one `range` argument.
pub fn gen_bound(bound: &Bound) -> Result<String, Error> {
    let text = match bound {
        Bound::Literal(value) => value.to_string(),
        Bound::Value(node) => gen_expression(node, false)?,
        Bound::Offset(node, delta) if *delta < 0 => {
            format!("({} - {})", gen_expression(node, true)?, delta.unsigned_abs())
        }
        Bound::Offset(node, delta) => format!("({} + {})", gen_expression(node, true)?, delta),
        Bound::Negated(node) => {
            let value = gen_expression(node, true)?;
            if value.starts_with('-') {
                format!("-({})", value)
            } else {
                format!("-{}", value)
            }
        }
    };
    Ok(text)
}
