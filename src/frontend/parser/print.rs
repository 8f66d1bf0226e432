//! Pretty printer: renders an AST back to source-like text.
//!
//! Every message is parenthesized so the tree's grouping is visible:
//! `1 + 2 * 3` prints as `((1 + 2) * 3)`.

use std::fmt;

use super::ast::{Block, Define, Expr};
use crate::util::format::{format_number, quote_string};

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn write(
        &mut self,
        text: &str,
    ) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn expr(
        &mut self,
        expr: &Expr,
    ) {
        match expr {
            Expr::Array(elements) => {
                self.write("#[");
                for (i, element) in elements.iter().enumerate() {
                    if i != 0 {
                        self.write(", ");
                    }
                    self.expr(element);
                }
                self.write("]");
            }
            Expr::Bind { receiver, defines } => {
                self.expr(receiver);
                self.write(" :: ");
                match defines.as_slice() {
                    [define] => self.define(define),
                    _ => {
                        self.write("(");
                        self.defines(defines);
                        self.write(")");
                    }
                }
            }
            Expr::Block(block) => self.block(block, true),
            Expr::Message {
                receiver,
                name,
                args,
            } => self.message(receiver.as_deref(), name, args),
            Expr::Name(name) => self.write(name),
            Expr::Number(value) => self.write(&format_number(*value)),
            Expr::Object { parent, defines } => {
                self.write("[");
                if let Some(parent) = parent {
                    self.write(" |");
                    self.expr(parent);
                    self.write("|");
                }
                match defines.as_slice() {
                    [] => {}
                    [define] => {
                        self.write(" ");
                        self.define(define);
                        self.write(" ");
                    }
                    _ => self.defines(defines),
                }
                self.write("]");
            }
            Expr::SelfRef => self.write("self"),
            Expr::Sequence(exprs) => {
                for (i, expr) in exprs.iter().enumerate() {
                    if i != 0 {
                        self.newline();
                    }
                    self.expr(expr);
                }
            }
            Expr::Set { name, value } => {
                self.write(name);
                self.write(" <-- ");
                self.expr(value);
            }
            Expr::String(value) => self.write(&quote_string(value)),
            Expr::Var { name, value } => {
                self.write(name);
                self.write(" <- ");
                self.expr(value);
            }
            Expr::Return(value) => {
                self.write("return");
                if let Some(value) = value {
                    self.write(" ");
                    self.expr(value);
                }
            }
            Expr::Await(value) => {
                self.write("await ");
                self.expr(value);
            }
            Expr::Error(_) => self.write("<parse error>"),
        }
    }

    fn message(
        &mut self,
        receiver: Option<&Expr>,
        name: &str,
        args: &[Expr],
    ) {
        self.write("(");
        if let Some(receiver) = receiver {
            self.expr(receiver);
            self.write(" ");
        }

        if args.is_empty() {
            self.write(name);
        } else if name.contains(':') {
            let parts = name.split_inclusive(':');
            for (i, (part, arg)) in parts.zip(args).enumerate() {
                if i != 0 {
                    self.write(" ");
                }
                self.write(part);
                self.write(" ");
                self.expr(arg);
            }
        } else {
            self.write(name);
            for arg in args {
                self.write(" ");
                self.expr(arg);
            }
        }
        self.write(")");
    }

    fn block(
        &mut self,
        block: &Block,
        braces: bool,
    ) {
        if braces {
            if block.is_async {
                self.write("async ");
            }
            self.write("{");
            if !block.params.is_empty() {
                self.write(" |");
                self.write(&block.params.join(" "));
                self.write("|");
            }
        }

        if let Expr::Sequence(_) = block.body.as_ref() {
            self.indent += 1;
            self.newline();
            self.expr(&block.body);
            self.indent -= 1;
            self.newline();
        } else {
            self.write(" ");
            self.expr(&block.body);
            self.write(" ");
        }
        self.write("}");
    }

    fn defines(
        &mut self,
        defines: &[Define],
    ) {
        self.indent += 1;
        for define in defines {
            self.newline();
            self.define(define);
        }
        self.indent -= 1;
        self.newline();
    }

    fn define(
        &mut self,
        define: &Define,
    ) {
        match (&define.body, define.is_method) {
            (Expr::Block(block), true) => {
                if define.name.contains(':') {
                    for (part, param) in define.name.split_inclusive(':').zip(&block.params) {
                        self.write(part);
                        self.write(" ");
                        self.write(param);
                        self.write(" ");
                    }
                } else {
                    self.write(&define.name);
                    self.write(" ");
                    if let Some(param) = block.params.first() {
                        self.write(param);
                        self.write(" ");
                    }
                }
                self.write("{");
                self.block(block, false);
            }
            (body, _) => {
                self.write(&define.name);
                self.write(" <- ");
                self.expr(body);
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut printer = Printer::default();
        printer.expr(self);
        f.write_str(&printer.out)
    }
}

impl fmt::Display for Define {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut printer = Printer::default();
        printer.define(self);
        f.write_str(&printer.out)
    }
}
