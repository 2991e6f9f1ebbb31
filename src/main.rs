use log::{debug, info};
use saga::display_manager::create_display;
use saga::input::StdinInput;
use saga::{AdventureError, Database, GameOutcome, Interpreter, InterpreterConfig};
use std::env;
use std::io::ErrorKind;
use std::process;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("saga", String::as_str);

    // Asking for help is not an error
    if args.len() < 2 {
        println!("saga - interpreter for packed integer text adventure databases");
        println!();
        println!("Usage: {} <adventure.dat>", program);
        println!("Example:");
        println!("  {} tests/data/tiny.dat", program);
        println!();
        println!("Settings are read from the TOML file named by SAGA_CONFIG.");
        println!("DISPLAY_MODE=terminal|plain overrides the display.");
        return Ok(());
    }

    let game_path = &args[1];

    let config = match InterpreterConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    debug!("Configuration: {:?}", config);

    let db = match Database::from_file(game_path) {
        Ok(db) => db,
        Err(AdventureError::Io(e)) => {
            match e.kind() {
                ErrorKind::NotFound => {
                    eprintln!("Error: Game file not found: {}", game_path);
                    eprintln!();
                    eprintln!("Please check:");
                    eprintln!("• File path is correct");
                    eprintln!("• You're running from the right directory");
                    eprintln!("• File exists and is readable");
                }
                ErrorKind::PermissionDenied => {
                    eprintln!(
                        "Error: Permission denied accessing game file: {}",
                        game_path
                    );
                    eprintln!();
                    eprintln!("Please check file permissions.");
                }
                _ => {
                    eprintln!("Error: Cannot read game file '{}': {}", game_path, e);
                }
            }
            process::exit(1);
        }
        Err(e) if e.is_data_format() => {
            eprintln!("Error: '{}' is not a valid adventure database", game_path);
            eprintln!("{}", e);
            process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let display = create_display(config.display);
    let mut interpreter = Interpreter::new(db, config, display, Box::new(StdinInput::new()));

    match interpreter.run() {
        Ok(outcome) => {
            info!("Game ended: {:?}", outcome);
            if outcome == GameOutcome::EndOfInput {
                debug!("No more input");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("\nError during execution: {e}");
            Err(e.into())
        }
    }
}
