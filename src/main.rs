//! Headless quadlabel runner.
//!
//! Reads editor commands, one per line, from the file named on the command
//! line or from stdin. `list` prints the quads of the open image; lines
//! starting with `#` are ignored.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::io::{BufRead, BufReader};
    use std::process::ExitCode;

    use quadlabel::{Editor, EditorConfig, EditorMessage};

    let config = EditorConfig::load_from_default_path().unwrap_or_default();

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let input: Box<dyn BufRead> = match std::env::args_os().nth(1) {
        Some(path) => match std::fs::File::open(&path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("Failed to open {:?}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let mut editor = Editor::new(&config);
    let mut failed = false;

    for (idx, line) in input.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                failed = true;
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line == "list" {
            for quad in editor.render_quads() {
                let marker = if quad.latest { "*" } else { " " };
                let points: Vec<String> =
                    quad.quad.points().iter().map(ToString::to_string).collect();
                println!("{}{} {} {}", marker, quad.index, quad.label, points.join(" "));
            }
            continue;
        }

        match line.parse::<EditorMessage>() {
            Ok(message) => {
                if let Err(e) = editor.update(message) {
                    eprintln!("line {}: {}", idx + 1, e);
                }
            }
            Err(e) => eprintln!("line {}: {}", idx + 1, e),
        }
    }

    if let Err(e) = editor.on_image_closed() {
        eprintln!("Failed to save annotations: {}", e);
        failed = true;
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// The library is used directly on wasm; there is no runner.
#[cfg(target_arch = "wasm32")]
fn main() {}
