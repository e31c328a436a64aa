use colored::Colorize;
use std::time::Duration;

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Print a line of streamed command output, as produced
pub fn output(line: &str) {
    print!("{}", line.dimmed());
    if !line.ends_with('\n') {
        println!();
    }
}

/// Format an elapsed time as whole milliseconds
pub fn elapsed_ms(elapsed: Duration) -> String {
    format!("{}ms", elapsed.as_millis())
}

/// Print the installer banner
pub fn banner() {
    println!("{}", "Setting up your app...".cyan().bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_ms() {
        assert_eq!(elapsed_ms(Duration::from_millis(0)), "0ms");
        assert_eq!(elapsed_ms(Duration::from_micros(12_900)), "12ms");
        assert_eq!(elapsed_ms(Duration::from_secs(2)), "2000ms");
    }
}
