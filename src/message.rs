//! Host events for the editor.
//!
//! Every UI action the host forwards is one [`EditorMessage`]. Messages also
//! have a one-line text form so sessions can be scripted:
//!
//! ```text
//! open shots/img.png
//! label bus
//! click 10 10
//! undo
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Messages that drive [`crate::editor::Editor::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum EditorMessage {
    /// A new image is shown
    ImageOpened(PathBuf),
    /// The current image was closed
    ImageClosed,
    /// Left click at display coordinates
    Clicked { x: f64, y: f64 },
    /// Cancel the pending gesture or remove the last quad
    Undo,
    /// Restore the last removed quad
    Redo,
    /// Move the last quad's origin to its next corner
    RotateOrigin,
    /// The label text field changed
    LabelTextChanged(String),
    /// The image is now drawn at a different scale
    DisplayScaleChanged(f64),
}

/// Errors from parsing a message line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMessageError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{command}' expects {expected}")]
    BadArguments {
        command: String,
        expected: &'static str,
    },
}

impl ParseMessageError {
    fn bad_arguments(command: &str, expected: &'static str) -> Self {
        Self::BadArguments {
            command: command.to_string(),
            expected,
        }
    }
}

fn parse_number(
    command: &str,
    text: &str,
    expected: &'static str,
) -> Result<f64, ParseMessageError> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseMessageError::bad_arguments(command, expected))
}

impl FromStr for EditorMessage {
    type Err = ParseMessageError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let no_args = |message: EditorMessage| {
            if args.is_empty() {
                Ok(message)
            } else {
                Err(ParseMessageError::bad_arguments(command, "no arguments"))
            }
        };

        match command {
            "" => Err(ParseMessageError::Empty),
            "open" => {
                if rest.is_empty() {
                    return Err(ParseMessageError::bad_arguments(command, "an image path"));
                }
                Ok(EditorMessage::ImageOpened(PathBuf::from(rest)))
            }
            "close" => no_args(EditorMessage::ImageClosed),
            "click" => match args.as_slice() {
                [x, y] => Ok(EditorMessage::Clicked {
                    x: parse_number(command, x, "two coordinates")?,
                    y: parse_number(command, y, "two coordinates")?,
                }),
                _ => Err(ParseMessageError::bad_arguments(command, "two coordinates")),
            },
            "undo" => no_args(EditorMessage::Undo),
            "redo" => no_args(EditorMessage::Redo),
            "rotate" => no_args(EditorMessage::RotateOrigin),
            // Passed through as typed; the editor decides whether it's a valid label.
            "label" => Ok(EditorMessage::LabelTextChanged(rest.to_string())),
            "scale" => match args.as_slice() {
                [scale] => Ok(EditorMessage::DisplayScaleChanged(parse_number(
                    command,
                    scale,
                    "one number",
                )?)),
                _ => Err(ParseMessageError::bad_arguments(command, "one number")),
            },
            other => Err(ParseMessageError::UnknownCommand(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "open shots/img one.png".parse(),
            Ok(EditorMessage::ImageOpened(PathBuf::from("shots/img one.png")))
        );
        assert_eq!("close".parse(), Ok(EditorMessage::ImageClosed));
        assert_eq!(
            "click 10 20.5".parse(),
            Ok(EditorMessage::Clicked { x: 10.0, y: 20.5 })
        );
        assert_eq!("  undo  ".parse(), Ok(EditorMessage::Undo));
        assert_eq!("redo".parse(), Ok(EditorMessage::Redo));
        assert_eq!("rotate".parse(), Ok(EditorMessage::RotateOrigin));
        assert_eq!(
            "label bus".parse(),
            Ok(EditorMessage::LabelTextChanged("bus".into()))
        );
        assert_eq!(
            "scale 0.5".parse(),
            Ok(EditorMessage::DisplayScaleChanged(0.5))
        );
    }

    #[test]
    fn test_label_keeps_text_for_validation() {
        assert_eq!(
            "label two words".parse(),
            Ok(EditorMessage::LabelTextChanged("two words".into()))
        );
        assert_eq!(
            "label".parse(),
            Ok(EditorMessage::LabelTextChanged(String::new()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<EditorMessage>(), Err(ParseMessageError::Empty));
        assert_eq!(
            "zoom 2".parse::<EditorMessage>(),
            Err(ParseMessageError::UnknownCommand("zoom".into()))
        );
        assert!(matches!(
            "click 1".parse::<EditorMessage>(),
            Err(ParseMessageError::BadArguments { .. })
        ));
        assert!("click 1 y".parse::<EditorMessage>().is_err());
        assert!("click 1 NaN".parse::<EditorMessage>().is_err());
        assert!("undo now".parse::<EditorMessage>().is_err());
        assert!("open".parse::<EditorMessage>().is_err());
    }
}
