use std::io::{self, BufRead, Write};

/// Only a literal "yes" (any case) proceeds. The line ending is dropped,
/// any other whitespace makes the answer a decline.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.strip_suffix('\n').unwrap_or(answer);
    let answer = answer.strip_suffix('\r').unwrap_or(answer);
    answer.eq_ignore_ascii_case("yes")
}

/// Print `prompt` and read one line of operator input.
///
/// End of input counts as a decline.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> io::Result<bool> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(false);
    }
    Ok(is_affirmative(&answer))
}
