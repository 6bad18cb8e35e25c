use crate::cli::parser::Commands;
use crate::core::attendance::split_segments;
use crate::errors::AppResult;
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Parse { text } = cmd {
        let segments = split_segments(text);
        if segments.is_empty() {
            warning(format!("No shift found in '{}'", text));
            return Ok(());
        }

        for (i, seg) in segments.iter().enumerate() {
            let suffix = if seg.is_overnight() { " (overnight)" } else { "" };
            println!("Shift {}: {}{}", i + 1, seg, suffix);
        }
    }
    Ok(())
}
