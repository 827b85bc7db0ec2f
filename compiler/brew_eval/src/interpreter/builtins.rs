//! Built-in functions: `print`, `read-int` and `read-string`.

use brew_ir::{Expr, Name};

use super::interned_names::Builtin;
use super::Interpreter;
use crate::errors::{invalid_integer_input, unprintable, wrong_builtin_args, EvalResult};
use crate::Value;

impl Interpreter<'_> {
    pub(super) fn eval_builtin(&mut self, builtin: Builtin, name: Name, args: &[Expr]) -> EvalResult {
        match builtin {
            Builtin::Print => self.eval_print(args),
            Builtin::ReadInt | Builtin::ReadString => {
                let line = self.read_with_prompt(name, args)?;
                if builtin == Builtin::ReadString {
                    return Ok(Value::string(line));
                }
                line.trim()
                    .parse::<i64>()
                    .map(Value::Int)
                    .map_err(|_| invalid_integer_input(&line))
            }
        }
    }

    /// Concatenate the display strings of `args` into one output line.
    fn eval_print(&mut self, args: &[Expr]) -> EvalResult {
        let mut line = String::new();
        for arg in args {
            let value = self.eval_expr(arg)?;
            let text = value
                .display_string()
                .ok_or_else(|| unprintable(value.type_of()))?;
            line.push_str(&text);
        }
        self.io.output(&line);
        Ok(Value::Nil)
    }

    /// Write the optional prompt, then read one line.
    fn read_with_prompt(&mut self, name: Name, args: &[Expr]) -> Result<String, crate::EvalError> {
        match args {
            [] => {}
            [prompt] => {
                let value = self.eval_expr(prompt)?;
                let text = value
                    .display_string()
                    .ok_or_else(|| unprintable(value.type_of()))?;
                self.io.output(&text);
            }
            _ => return Err(wrong_builtin_args(self.name_str(name), 1, args.len())),
        }
        Ok(self.io.read_line())
    }
}
