//! Interactive read-eval-print loop

use std::io::{self, BufRead, Write};

use crate::{Lexer, Parser, Scope, evaluate};

pub const PROMPT: &str = ">> ";

/// Reads conditions line by line and prints each one's parenthesized form
/// and value, or its parse errors.
///
/// The prompt is only written when `interactive` is set. `quit` or `exit`
/// ends the loop, as does end of input.
pub fn start<R, W, S>(input: R, mut output: W, scope: &S, interactive: bool) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    S: Scope + ?Sized,
{
    let mut lines = input.lines();

    loop {
        if interactive {
            write!(output, "{}", PROMPT)?;
            output.flush()?;
        }

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        let line = line.trim();

        match line {
            "quit" | "exit" => return Ok(()),
            "" => continue,
            _ => {}
        }

        let mut parser = Parser::new(Lexer::new(line));
        let expr = parser.parse();

        if !parser.errors().is_empty() {
            writeln!(output, "Parser errors:")?;
            for msg in parser.errors() {
                writeln!(output, "\t{}", msg)?;
            }
            continue;
        }

        if let Some(expr) = expr {
            writeln!(output, "Expression: {}", expr)?;
            writeln!(output, "{}", evaluate(&expr, scope))?;
        }
    }
}
