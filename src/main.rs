use conwrap::geometry::WindowRect;
use conwrap::native::{self, ConsoleBackend};
use conwrap::runner::{self, PauseMode, RunConfig};
use conwrap::store;

// Build-time version information
const BUILD_DATE: &str = env!("BUILD_DATE");
const GIT_HASH: &str = env!("GIT_HASH");

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Handle --help and --version before touching the console
    for arg in args.iter().skip(1) {
        if arg == "--help" || arg == "-h" {
            print_help();
            std::process::exit(0);
        } else if arg == "--version" || arg == "-v" {
            print_version();
            std::process::exit(0);
        }
    }

    let mut config = RunConfig::default();
    let mut command: Vec<String> = Vec::new();
    let mut index = 1;
    while index < args.len() {
        match args[index].as_str() {
            "--no-icon" => config.set_icon = false,
            "--pause" if index + 1 < args.len() => {
                index += 1;
                config.pause = match args[index].as_str() {
                    "auto" => PauseMode::Auto,
                    "always" => PauseMode::Always,
                    "never" => PauseMode::Never,
                    other => {
                        eprintln!("[MAIN] Unknown pause mode '{}', using auto", other);
                        PauseMode::Auto
                    }
                };
            }
            other => command.push(other.to_string()),
        }
        index += 1;
    }

    let backend = native::platform_backend();
    runner::run(config, &backend, || run_command(&backend, &command));
}

fn run_command(backend: &dyn ConsoleBackend, command: &[String]) -> Result<i32, String> {
    match command.first().map(String::as_str) {
        None | Some("detect") => {
            print_detection_report(backend);
            Ok(0)
        }
        Some("rect") => {
            let rect = store::current_rect(backend)
                .map_err(|e| format!("failed to query the console window rectangle: {}", e))?;
            println!("{}", rect.to_corner_text());
            Ok(0)
        }
        Some("apply") => {
            let text = command
                .get(1)
                .ok_or_else(|| "usage: conwrap apply \"<x1, y1, x2, y2>\"".to_string())?;
            let rect = WindowRect::from_corner_text(text).map_err(|e| format!("bad rectangle: {}", e))?;
            store::apply_rect(backend, &rect).map_err(|e| format!("failed to apply the rectangle: {}", e))?;
            Ok(0)
        }
        Some("path") => {
            let path = store::settings_file_path().map_err(|e| format!("failed to locate the settings file: {}", e))?;
            println!("{}", path.display());
            Ok(0)
        }
        Some("save") => {
            store::save_window_rect(backend);
            Ok(0)
        }
        Some("restore") => {
            store::restore_window_rect(backend);
            Ok(0)
        }
        Some("visibility") => {
            let visible = match command.get(1).map(String::as_str) {
                Some("show") => true,
                Some("hide") => false,
                _ => return Err("usage: conwrap visibility <show|hide>".to_string()),
            };
            runner::set_console_visibility(backend, visible);
            Ok(0)
        }
        Some(other) => Err(format!("unknown command '{}'; try --help", other)),
    }
}

fn print_detection_report(backend: &dyn ConsoleBackend) {
    // Re-runs the probes for display; the authoritative detection already
    // happened inside the run boundary before any output.
    let from_gui = conwrap::is_launched_from_gui(backend);
    println!(
        "launch context : {}",
        if from_gui { "graphical shell" } else { "command shell" }
    );
    match backend.window_title() {
        Some(title) => println!("window title   : {}", title),
        None => println!("window title   : (not queryable)"),
    }
    match backend.cursor_position() {
        Ok((column, row)) => println!("cursor         : column {}, row {}", column, row),
        Err(error) => println!("cursor         : {}", error),
    }
    match store::current_rect(backend) {
        Ok(rect) => println!("window rect    : {}", rect.to_corner_text()),
        Err(error) => println!("window rect    : {}", error),
    }
    match store::settings_file_path() {
        Ok(path) => println!("settings file  : {}", path.display()),
        Err(error) => println!("settings file  : {}", error),
    }
}

fn print_help() {
    println!("conwrap v{} ({}, built {})", env!("CARGO_PKG_VERSION"), GIT_HASH, BUILD_DATE);
    println!();
    println!("USAGE:");
    println!("    conwrap [OPTIONS] [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    detect                      Report the detected launch context (default)");
    println!("    rect                        Print the console window rectangle as x1, y1, x2, y2");
    println!("    apply \"<x1, y1, x2, y2>\"    Clamp the rectangle to the desktop and apply it");
    println!("    save                        Save the current window rectangle");
    println!("    restore                     Restore the saved window rectangle");
    println!("    path                        Print the settings file path");
    println!("    visibility <show|hide>      Show or hide the console window");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help                  Print help information");
    println!("    -v, --version               Print version information");
    println!("    --no-icon                   Skip setting the console window icon");
    println!("    --pause <auto|always|never> When to pause before the window closes");
}

fn print_version() {
    println!("conwrap {} ({}, built {})", env!("CARGO_PKG_VERSION"), GIT_HASH, BUILD_DATE);
}
