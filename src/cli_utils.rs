use std::io::Write;

use anyhow::Result;

// prints the prompt and reads one line, None once stdin is closed
pub fn prompt_line(prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut buffer = String::new();
    let read = std::io::stdin().read_line(&mut buffer)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(buffer))
}
