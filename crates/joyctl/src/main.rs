use anyhow::Context;
use clap::{Parser, Subcommand};
use joystick::config;
use joystick::gesture::PointerId;
use joystick::menu::MENU_RADIUS;
use joystick::protocol::{Command, SOCKET_PATH};
use joystick::{Direction, Vector};
use std::io::{Read, Write};
use std::net::Shutdown;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "joyctl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Socket of the running joystick daemon
    #[arg(short, long, default_value = SOCKET_PATH)]
    socket: PathBuf,

    /// Pointer id to send press, move and release with
    #[arg(short, long, default_value_t = 0)]
    pointer: u32,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Write the default config file if it is missing and print its path
    Init,
    /// Show the menu
    Show,
    /// Hide the menu
    Hide,
    /// Begin a press
    Press,
    /// Drag to a translation relative to the press, in dip
    #[command(allow_negative_numbers = true)]
    Move { x: f64, y: f64 },
    /// End the press
    Release,
    /// Abort the gesture
    Cancel,
    /// Print the gesture state
    State,
    /// Print the latest animation frame
    Frame,
    /// Press, drag toward a direction and release
    Flick {
        direction: Direction,

        /// Distance of the drag in dip
        #[arg(short, long, default_value_t = MENU_RADIUS)]
        distance: f64,

        /// How long to hold before dragging, in milliseconds
        #[arg(long, default_value_t = 50)]
        hold: u64,

        /// Number of intermediate moves
        #[arg(long, default_value_t = 6)]
        steps: u32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let pointer = PointerId::from(cli.pointer);

    match cli.command {
        Commands::Init => {
            let path = config::write_default_config().context("Failed to write config")?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Show => send(&cli.socket, &[Command::Show]),
        Commands::Hide => send(&cli.socket, &[Command::Hide]),
        Commands::Press => send(&cli.socket, &[Command::Press(pointer)]),
        Commands::Move { x, y } => send(&cli.socket, &[Command::Move(Vector::new(x, y), pointer)]),
        Commands::Release => send(&cli.socket, &[Command::Release(pointer)]),
        Commands::Cancel => send(&cli.socket, &[Command::Cancel]),
        Commands::State => query(&cli.socket, Command::State),
        Commands::Frame => query(&cli.socket, Command::Frame),
        Commands::Flick {
            direction,
            distance,
            hold,
            steps,
        } => flick(&cli.socket, pointer, direction, distance, hold, steps),
    }
}

fn connect(socket: &Path) -> anyhow::Result<UnixStream> {
    UnixStream::connect(socket).with_context(|| {
        format!(
            "Failed to connect to joystick daemon at {}. Is joystick running?",
            socket.display()
        )
    })
}

fn write_line(stream: &mut UnixStream, command: Command) -> anyhow::Result<()> {
    log::debug!("-> {}", command);
    writeln!(stream, "{}", command).context("Failed to send command")
}

fn send(socket: &Path, commands: &[Command]) -> anyhow::Result<()> {
    let mut stream = connect(socket)?;
    for &command in commands {
        write_line(&mut stream, command)?;
    }
    Ok(())
}

fn query(socket: &Path, command: Command) -> anyhow::Result<()> {
    let mut stream = connect(socket)?;
    write_line(&mut stream, command)?;
    stream.shutdown(Shutdown::Write)?;

    let mut answer = String::new();
    stream
        .read_to_string(&mut answer)
        .context("Failed to read answer")?;
    print!("{}", answer);
    Ok(())
}

fn flick(
    socket: &Path,
    pointer: PointerId,
    direction: Direction,
    distance: f64,
    hold: u64,
    steps: u32,
) -> anyhow::Result<()> {
    let mut stream = connect(socket)?;
    let target = direction.unit() * distance;
    let steps = steps.max(1);

    write_line(&mut stream, Command::Press(pointer))?;
    thread::sleep(Duration::from_millis(hold));

    for i in 1..=steps {
        let t = f64::from(i) / f64::from(steps);
        write_line(&mut stream, Command::Move(target * t, pointer))?;
        thread::sleep(Duration::from_millis(16));
    }

    write_line(&mut stream, Command::Release(pointer))
}
