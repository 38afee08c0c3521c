use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use std::string::String;

use rand::rngs::SmallRng;

use crate::combat::side_fire_zones;
use crate::common::{Cell, GameEvent, Movement, Orientation, Rotation, Side};
use crate::fleet::Fleet;
use crate::game::Match;

use super::Player;

/// Interactive seat reading commands from a line-oriented input.
pub struct CliPlayer<R = io::StdinLock<'static>> {
    input: R,
    quit: bool,
}

impl CliPlayer {
    /// Seat reading from standard input.
    pub fn new() -> Self {
        Self::with_input(io::stdin().lock())
    }
}

impl Default for CliPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead> CliPlayer<R> {
    /// Seat reading scripted commands from any buffered reader.
    pub fn with_input(input: R) -> Self {
        Self { input, quit: false }
    }

    fn read_command(&mut self) -> io::Result<Option<String>> {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_ascii_lowercase()))
    }
}

/// Parse `"x y"` or `"x,y"` into a cell.
pub fn parse_cell(input: &str) -> Result<Cell, String> {
    let mut parts = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty());
    let x = parts.next().ok_or("Missing x coordinate")?;
    let y = parts.next().ok_or("Missing y coordinate")?;
    if parts.next().is_some() {
        return Err("Too many coordinates - expected: x y".to_string());
    }
    let x: i32 = x
        .parse()
        .map_err(|_| format!("Invalid x '{}' - must be a number", x))?;
    let y: i32 = y
        .parse()
        .map_err(|_| format!("Invalid y '{}' - must be a number", y))?;
    Ok(Cell::new(x, y))
}

/// Parse a board direction for `nudge`.
pub fn parse_direction(input: &str) -> Result<Orientation, String> {
    match input.trim() {
        "up" | "u" => Ok(Orientation::Up),
        "down" | "dn" => Ok(Orientation::Down),
        "left" | "l" => Ok(Orientation::Left),
        "right" | "r" => Ok(Orientation::Right),
        "" => Err("Missing direction - expected: up, down, left or right".to_string()),
        other => Err(format!("Invalid direction '{}'", other)),
    }
}

/// Render the board with `y` growing upward. Side A hulls are `A`/`a`,
/// side B hulls `B`/`b` (capital at the bow), the selected vessel `*`,
/// and its fire zones `+`.
pub fn render_board(fleet: &Fleet, zones: &BTreeSet<Cell>) -> String {
    let grid = fleet.grid();
    let mut out = String::new();
    for y in (0..grid.rows()).rev() {
        out.push_str(&format!("{:3} ", y));
        for x in 0..grid.columns() {
            let cell = Cell::new(x, y);
            let ch = match fleet.vessel_at(cell).and_then(|id| fleet.get(id)) {
                Some(v) if v.is_selected => '*',
                Some(v) => {
                    let bow = v.bow() == cell;
                    match (v.side(), bow) {
                        (Side::A, true) => 'A',
                        (Side::A, false) => 'a',
                        (Side::B, true) => 'B',
                        (Side::B, false) => 'b',
                    }
                }
                None if zones.contains(&cell) => '+',
                None => '.',
            };
            out.push(' ');
            out.push(ch);
        }
        out.push('\n');
    }
    out.push_str("    ");
    for x in 0..grid.columns() {
        out.push_str(&format!(" {}", x % 10));
    }
    out.push('\n');
    out
}

/// Print the board and a status line for `game`.
pub fn print_match(game: &Match) {
    let zones = game
        .selected()
        .and_then(|id| game.fleet().get(id))
        .map(|v| side_fire_zones(game.fleet().grid(), v))
        .unwrap_or_default();
    println!("\n{}", render_board(game.fleet(), &zones));
    println!(
        "Turn {} | {:?} | Player 1: {} ships | Player 2: {} ships",
        game.turn_number(),
        game.phase(),
        game.fleet().alive_count(Side::A),
        game.fleet().alive_count(Side::B),
    );
    if let Some(v) = game.selected().and_then(|id| game.fleet().get(id)) {
        println!(
            "Selected: length {} facing {:?}, guns {}/{} per flank",
            v.length(),
            v.orientation(),
            v.weapons_per_flank(),
            v.max_weapons_per_flank(),
        );
    }
}

fn print_help() {
    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║                     COMMANDS                           ║");
    println!("╠════════════════════════════════════════════════════════╣");
    println!("║ select X Y   - pick your ship covering cell (X, Y)     ║");
    println!("║ fwd / back   - move one cell ahead / astern            ║");
    println!("║ left / right - strafe one cell                         ║");
    println!("║ cw / ccw     - rotate 90 degrees about the bow         ║");
    println!("║ nudge DIR    - shift one cell up/down/left/right       ║");
    println!("║ ok           - confirm the maneuver, go to fire phase  ║");
    println!("║ fire         - fire a full broadside                   ║");
    println!("║ shoot X Y    - fire a single shot at (X, Y)            ║");
    println!("║ deselect     - drop the selection                      ║");
    println!("║ end          - end the phase (pass in select phase)    ║");
    println!("║ quit         - leave the match                         ║");
    println!("╚════════════════════════════════════════════════════════╝\n");
}

impl<R: BufRead> Player for CliPlayer<R> {
    fn take_turn(&mut self, game: &mut Match, _rng: &mut SmallRng) -> anyhow::Result<()> {
        let Some(side) = game.active_side() else {
            return Ok(());
        };
        println!("\n═══ {}'s turn ═══", side);
        print_match(game);
        while game.phase().active_side() == Some(side) {
            let Some(line) = self.read_command()? else {
                self.quit = true;
                return Ok(());
            };
            let (cmd, rest) = line.split_once(' ').unwrap_or((line.as_str(), ""));
            let accepted = match cmd {
                "" => continue,
                "help" | "?" => {
                    print_help();
                    continue;
                }
                "quit" | "q" => {
                    self.quit = true;
                    return Ok(());
                }
                "select" | "sel" => match parse_cell(rest) {
                    Ok(cell) => game.select_vessel(cell).is_some(),
                    Err(e) => {
                        println!("✗ {}", e);
                        continue;
                    }
                },
                "fwd" | "w" => game.move_selected(Movement::Forward),
                "back" | "s" => game.move_selected(Movement::Backward),
                "left" | "a" => game.move_selected(Movement::StrafeLeft),
                "right" | "d" => game.move_selected(Movement::StrafeRight),
                "cw" | "e" => game.rotate_selected(Rotation::Clockwise),
                "ccw" => game.rotate_selected(Rotation::CounterClockwise),
                "nudge" | "n" => match parse_direction(rest) {
                    Ok(direction) => game.nudge_selected(direction),
                    Err(e) => {
                        println!("✗ {}", e);
                        continue;
                    }
                },
                "ok" | "confirm" => game.confirm_maneuver(),
                "deselect" | "tab" => game.deselect(),
                "fire" | "f" => match game.fire_broadside() {
                    Some(hits) if hits.is_empty() => {
                        println!("No targets in range!");
                        true
                    }
                    Some(hits) => {
                        let destroyed = hits.iter().filter(|h| h.destroyed).count();
                        if destroyed > 0 {
                            println!("💥 {} ship(s) destroyed!", destroyed);
                        } else {
                            println!("🎯 {} hit(s)!", hits.len());
                        }
                        true
                    }
                    None => false,
                },
                "shoot" => match parse_cell(rest) {
                    Ok(cell) => match game.fire_at(cell) {
                        Some(shot) if shot.destroyed => {
                            println!("💥 Ship destroyed!");
                            true
                        }
                        Some(shot) if shot.hit.is_some() => {
                            println!("🎯 Hit!");
                            true
                        }
                        Some(_) => {
                            println!("💧 Miss!");
                            true
                        }
                        None => false,
                    },
                    Err(e) => {
                        println!("✗ {}", e);
                        continue;
                    }
                },
                "end" | "enter" => game.end_phase(),
                other => {
                    println!("✗ Unknown command '{}' - type 'help'", other);
                    continue;
                }
            };
            if accepted {
                if game.phase().active_side() == Some(side) {
                    print_match(game);
                }
            } else {
                println!("✗ Not possible right now ({:?})", game.phase());
            }
        }
        Ok(())
    }

    fn observe(&mut self, game: &Match, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Victory => println!("\n🏆 VICTORY! Player 2's fleet is sunk."),
                GameEvent::Defeat => println!("\n💀 DEFEAT! Player 1's fleet is sunk."),
                _ => {}
            }
        }
        if let Some(winner) = game.winner() {
            print_match(game);
            println!("{} wins after {} turns.", winner, game.turn_number());
        }
    }

    fn announce(&mut self, line: &str) {
        println!("⚓ {}", line);
    }

    fn wants_quit(&self) -> bool {
        self.quit
    }
}
