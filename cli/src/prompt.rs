use std::io::{self, BufRead, Write};

/// Reads answers from `input` and writes labels to `output`. Invalid
/// entries are re-asked in place; the only errors that escape are real
/// I/O failures, including a closed input stream.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Prompter<R, W> {
        Prompter { input, output }
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    pub fn line(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }

        Ok(buffer.trim().to_string())
    }

    pub fn nonempty(&mut self, label: &str) -> io::Result<String> {
        loop {
            let value = self.line(label)?;
            if !value.is_empty() {
                return Ok(value);
            }
            self.say("A value is required")?;
        }
    }

    /// Empty input means "no value".
    pub fn optional(&mut self, label: &str) -> io::Result<Option<String>> {
        let value = self.line(label)?;
        if value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }

    pub fn number(&mut self, label: &str) -> io::Result<i32> {
        loop {
            let value = self.line(label)?;
            match value.parse::<i32>() {
                Ok(number) => return Ok(number),
                Err(_) => self.say("Please enter a number")?,
            }
        }
    }

    pub fn number_in_range(&mut self, label: &str, min: i32, max: i32) -> io::Result<i32> {
        loop {
            let number = self.number(label)?;
            if number >= min && number <= max {
                return Ok(number);
            }
            self.say(&format!(
                "Please enter a number between {} and {}",
                min, max
            ))?;
        }
    }

    pub fn yes_no(&mut self, label: &str) -> io::Result<bool> {
        loop {
            let value = self.line(label)?.to_lowercase();
            match value.as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please answer y or n")?,
            }
        }
    }

    pub fn pause(&mut self) -> io::Result<()> {
        self.line("Press Enter to continue...")?;
        Ok(())
    }
}
