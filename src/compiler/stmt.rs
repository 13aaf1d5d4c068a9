use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
};

use super::{
    compiler::Compiler,
    expr::{gen_bound, gen_expression},
};

/// Emits the lines for `node`, which must be a program, a declaration or a
/// statement. Expression kinds have no lowering of their own here.
pub fn gen_statement(compiler: &mut Compiler, node: &Node) -> Result<(), Error> {
    match node.kind {
        NodeKind::Program => {
            for item in &node.children {
                gen_statement(compiler, item)?;
            }
        }
        NodeKind::Statement => gen_statement(compiler, node.child(0)?)?,
        NodeKind::Block => {
            compiler.indent();
            let body = node
                .children
                .iter()
                .try_for_each(|statement| gen_statement(compiler, statement));
            compiler.dedent();
            body?;
        }
        NodeKind::Assignment => {
            let target = node.child(0)?.get_content()?;
            let value = gen_expression(node.child(1)?, false)?;
            compiler.emit(format!("{} = {}", target, value));
        }
        NodeKind::Invocation => compiler.emit(gen_expression(node, false)?),
        NodeKind::FunctionDef => {
            let name = node.get_content()?;
            let params = gen_expression(node.child(1)?, false)?;

            compiler.blank_line();
            compiler.emit(format!("def {}({}):", name, params));
            gen_statement(compiler, node.child(2)?)?;
        }
        NodeKind::MainEntry => {
            compiler.blank_line();
            compiler.emit("def principal():");
            gen_statement(compiler, node.child(0)?)?;

            compiler.blank_line();
            compiler.blank_line();
            compiler.emit("if __name__ == '__main__':");
            compiler.indent();
            compiler.emit("principal()");
            compiler.dedent();
        }
        NodeKind::Loop => {
            let condition = gen_expression(node.child(0)?, false)?;
            compiler.emit(format!("while {}:", condition));
            gen_statement(compiler, node.child(1)?)?;
        }
        NodeKind::Conditional => {
            for branch in &node.children {
                gen_statement(compiler, branch)?;
            }
        }
        NodeKind::IfBranch => {
            let condition = gen_expression(node.child(0)?, false)?;
            compiler.emit(format!("if {}:", condition));
            gen_statement(compiler, node.child(1)?)?;
        }
        NodeKind::ElseBranch => {
            compiler.emit("else:");
            gen_statement(compiler, node.child(0)?)?;
        }
        NodeKind::SwitchCase => gen_switch_case(compiler, node)?,
        NodeKind::ForLoop => {
            let range = node.annotations.range.as_ref().ok_or_else(|| {
                Error::new(
                    ErrorImpl::MissingAnnotation {
                        node: node.kind.to_string(),
                        annotation: String::from("rango"),
                    },
                    node.position,
                    "dele vuelta",
                )
            })?;

            let start = gen_bound(&range.start)?;
            let stop = gen_bound(&range.stop)?;
            if range.has_unit_step() {
                compiler.emit(format!(
                    "for {} in range({}, {}):",
                    range.variable, start, stop
                ));
            } else {
                compiler.emit(format!(
                    "for {} in range({}, {}, {}):",
                    range.variable,
                    start,
                    stop,
                    gen_bound(&range.step)?
                ));
            }
            gen_statement(compiler, node.child(3)?)?;
        }
        NodeKind::TryCatch => {
            compiler.emit("try:");
            gen_statement(compiler, node.child(0)?)?;
            compiler.emit("except:");
            gen_statement(compiler, node.child(1)?)?;
        }
        NodeKind::Return => match node.children.first() {
            Some(value) => compiler.emit(format!("return {}", gen_expression(value, false)?)),
            None => compiler.emit("return"),
        },
        NodeKind::RaiseError => {
            let value = gen_expression(node.child(0)?, false)?;
            compiler.emit(format!(
                "print(\"\\033[91m\", {}, \"\\033[0m\", file=sys.stderr)",
                value
            ));
        }
        NodeKind::MathExpression
        | NodeKind::Expression
        | NodeKind::FunctionParams
        | NodeKind::CallParams
        | NodeKind::LogicalConnector
        | NodeKind::Condition
        | NodeKind::Comparison
        | NodeKind::BinaryOperator
        | NodeKind::BooleanLiteral
        | NodeKind::Comparator
        | NodeKind::TextLiteral
        | NodeKind::IntLiteral
        | NodeKind::FloatLiteral
        | NodeKind::Identifier
        | NodeKind::CaseArm => {
            return Err(Error::new(
                ErrorImpl::MissingLowering {
                    node: node.kind.to_string(),
                },
                node.position,
                node.content.clone().unwrap_or_default(),
            ))
        }
    }

    Ok(())
}

/// Lowers a switch into an `if`/`elif`/`else` ladder comparing the control
/// value against each case value in order.
fn gen_switch_case(compiler: &mut Compiler, node: &Node) -> Result<(), Error> {
    let control = gen_expression(node.child(0)?, false)?;

    for (index, arm) in node.children.iter().skip(1).enumerate() {
        if arm.is(NodeKind::ElseBranch) {
            gen_statement(compiler, arm)?;
            continue;
        }

        let keyword = if index == 0 { "if" } else { "elif" };
        let value = gen_expression(arm.child(0)?, false)?;
        compiler.emit(format!("{} {} == {}:", keyword, control, value));
        gen_statement(compiler, arm.child(1)?)?;
    }

    Ok(())
}
