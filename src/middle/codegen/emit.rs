//! Source text for a `Program`
//!
//! Renders the JavaScript-shaped listing shown by `jay compile`: methods
//! become `function`s wrapped in a `try/catch` return frame, blocks become
//! arrow functions, sends become `(receiver)["selector"](args)`.

use std::fmt::{self, Write};

use super::ir::{Code, Function, FunctionKind, Member, MethodId, Program, Stmt};
use crate::util::format::format_number;

struct CodeWriter<'a, 'b> {
    out: &'a mut fmt::Formatter<'b>,
    indent: usize,
}

impl CodeWriter<'_, '_> {
    fn write(
        &mut self,
        text: &str,
    ) -> fmt::Result {
        self.out.write_str(text)
    }

    fn newline(&mut self) -> fmt::Result {
        self.out.write_char('\n')?;
        for _ in 0..self.indent {
            self.out.write_str("  ")?;
        }
        Ok(())
    }

    fn quoted(
        &mut self,
        text: &str,
    ) -> fmt::Result {
        let quoted = serde_json::to_string(text).map_err(|_| fmt::Error)?;
        self.write(&quoted)
    }

    fn program(
        &mut self,
        program: &Program,
    ) -> fmt::Result {
        if program.inline {
            self.prologue(&program.unit)?;
            return self.statements(&program.unit.body);
        }

        let opening = if program.unit.awaits() { "(async function(){" } else { "(function(){" };
        self.write(opening)?;
        self.indent += 1;
        self.newline()?;
        self.prologue(&program.unit)?;
        self.framed(&program.unit.body, MethodId::PROGRAM)?;
        self.indent -= 1;
        self.newline()?;
        self.write("})()")
    }

    /// `var` declarations for hoisted locals
    fn prologue(
        &mut self,
        function: &Function,
    ) -> fmt::Result {
        let fresh: Vec<&str> = function
            .locals
            .iter()
            .filter(|local| !function.params.contains(local))
            .map(|local| local.mangled.as_str())
            .collect();
        if fresh.is_empty() {
            return Ok(());
        }
        self.write("var ")?;
        self.write(&fresh.join(", "))?;
        self.write(";")?;
        self.newline()
    }

    fn statements(
        &mut self,
        body: &[Stmt],
    ) -> fmt::Result {
        for (i, stmt) in body.iter().enumerate() {
            if i != 0 {
                self.newline()?;
            }
            match stmt {
                Stmt::Expr(code) => {
                    self.code(code)?;
                    self.write(";")?;
                }
                Stmt::Return(code) => {
                    self.write("return (")?;
                    self.code(code)?;
                    self.write(");")?;
                }
            }
        }
        Ok(())
    }

    /// Body wrapped in a frame catching returns tagged `id`
    fn framed(
        &mut self,
        body: &[Stmt],
        id: MethodId,
    ) -> fmt::Result {
        self.write("try {")?;
        self.indent += 1;
        self.newline()?;
        self.statements(body)?;
        self.indent -= 1;
        self.newline()?;
        self.write("} catch(e) {")?;
        self.indent += 1;
        self.newline()?;
        write!(
            self.out,
            "if (e instanceof ReturnExpr && e.id == {}) {{ return e.result }} else {{ throw e }}",
            id
        )?;
        self.indent -= 1;
        self.newline()?;
        self.write("}")
    }

    fn function(
        &mut self,
        function: &Function,
    ) -> fmt::Result {
        let params: Vec<&str> = function.params.iter().map(|p| p.mangled.as_str()).collect();
        let params = params.join(", ");

        match function.kind {
            FunctionKind::Method(_) | FunctionKind::Program => write!(self.out, "(function({}) {{", params)?,
            FunctionKind::Block if function.is_async => write!(self.out, "(async ({}) => {{", params)?,
            FunctionKind::Block => write!(self.out, "(({}) => {{", params)?,
        }

        self.indent += 1;
        self.newline()?;
        self.prologue(function)?;
        match function.frame() {
            Some(id) => self.framed(&function.body, id)?,
            None => self.statements(&function.body)?,
        }
        self.indent -= 1;
        self.newline()?;
        self.write("})")
    }

    fn code(
        &mut self,
        code: &Code,
    ) -> fmt::Result {
        match code {
            Code::Nil => self.write("Nil"),
            Code::True => self.write("True"),
            Code::False => self.write("False"),
            Code::Number(value) => self.write(&format_number(*value)),
            Code::Str(value) => self.quoted(value),
            Code::Local(ident) => self.write(&ident.mangled),
            Code::Field(ident) => write!(self.out, "this.{}", ident.mangled),
            Code::SelfRef => self.write("this"),
            Code::SetLocal { target, value } | Code::SetOuter { target, value } => {
                write!(self.out, "{} = ", target.mangled)?;
                self.code(value)
            }
            Code::SetField { target, value } => {
                write!(self.out, "this.{} = ", target.mangled)?;
                self.code(value)
            }
            Code::Send {
                receiver,
                selector,
                args,
            } => {
                match receiver {
                    Some(receiver) => {
                        self.write("(")?;
                        self.code(receiver)?;
                        self.write(")")?;
                    }
                    None => self.write("$Ether")?,
                }
                self.write("[")?;
                self.quoted(selector)?;
                self.write("](")?;
                self.list(args)?;
                self.write(")")
            }
            Code::Block(function) => self.function(function),
            Code::Object { parent, members } => {
                self.write("Object.assign(Object.create(")?;
                match parent {
                    Some(parent) => self.code(parent)?,
                    None => self.write("$Object")?,
                }
                self.write("), ")?;
                self.members(members)?;
                self.write(")")
            }
            Code::Bind { receiver, members } => {
                self.write("Object.assign(")?;
                self.code(receiver)?;
                self.write(", ")?;
                self.members(members)?;
                self.write(")")
            }
            Code::Array(elements) => {
                self.write("[")?;
                self.list(elements)?;
                self.write("]")
            }
            Code::Sequence(items) => {
                self.write("(")?;
                self.list(items)?;
                self.write(")")
            }
            Code::Return { value, target } => {
                self.write("(()=>{throw new ReturnExpr(")?;
                match value {
                    Some(value) => self.code(value)?,
                    None => self.write("Nil")?,
                }
                write!(self.out, ", {})}})()", target)
            }
            Code::Await(value) => {
                self.write("(await ")?;
                self.code(value)?;
                self.write(")")
            }
        }
    }

    fn list(
        &mut self,
        items: &[Code],
    ) -> fmt::Result {
        for (i, item) in items.iter().enumerate() {
            if i != 0 {
                self.write(", ")?;
            }
            self.code(item)?;
        }
        Ok(())
    }

    fn members(
        &mut self,
        members: &[Member],
    ) -> fmt::Result {
        if members.is_empty() {
            return self.write("{}");
        }

        self.write("{")?;
        self.indent += 1;
        for member in members {
            self.newline()?;
            self.quoted(member.key())?;
            self.write(": ")?;
            match member {
                Member::Accessor { field, .. } => write!(self.out, "function(){{ return this.{} }}", field.mangled)?,
                Member::Field { value, .. } => self.code(value)?,
                Member::Method { function, .. } => self.function(function)?,
            }
            self.write(",")?;
        }
        self.indent -= 1;
        self.newline()?;
        self.write("}")
    }
}

impl fmt::Display for Program {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        CodeWriter { out: f, indent: 0 }.program(self)
    }
}
