use std::io::stdin;
use std::thread;

use anyhow::{bail, Context};
use log::warn;
use msgs::observer_msg::ObserverMsg;
use msgs::role::{Intent, Role};
use msgs::DEFAULT_FLOOR;

use crate::context::AuthorityContextRef;
use crate::display::DisplayRef;

/// Identity used for hazard edits typed at the console.
const CONSOLE_ID: &str = "console";

pub fn console_input_thread(context_ref: AuthorityContextRef, display_ref: DisplayRef) {
    thread::spawn(move || {
        pollster::block_on(console_input_loop(context_ref, display_ref))
    });
}

pub async fn console_input_loop(context_ref: AuthorityContextRef, display_ref: DisplayRef) {
    loop {
        let mut input = String::new();
        match stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("console closed: {e}");
                break;
            }
        }
        match process_console_input(input.trim(), &context_ref, &display_ref).await {
            Ok(_) => {}
            Err(e) => println!("error: {e}"),
        }
    }
}

pub async fn process_console_input(input: &str, context_ref: &AuthorityContextRef, display_ref: &DisplayRef) -> anyhow::Result<()> {
    let (message_type, rem) = match input.find(' ') {
        Some(i) => (&input[..i], input[i+1..].trim()),
        None => (input, ""),
    };
    let args: Vec<&str> = rem.split_whitespace().collect();

    match message_type {
        "" => {}
        "status" => {
            let snapshot = context_ref.read().await.snapshot();
            let json = serde_json::to_string_pretty(&snapshot)?;
            println!("{json}");
        }
        "place" => {
            let (id, msg) = parse_place(&args)?;
            context_ref.write().await.accept(id, msg);
        }
        "withdraw" => {
            let id = args.first().context("usage: withdraw <id>")?;
            context_ref.write().await.accept(id, ObserverMsg::Withdraw);
        }
        "hazard" => {
            let msg = parse_hazard(&args)?;
            context_ref.write().await.accept(CONSOLE_ID, msg);
        }
        "clear" => {
            let floor = parse_floor(args.first())?;
            context_ref.write().await.accept(CONSOLE_ID, ObserverMsg::ClearHazards { floor });
        }
        "routes" => {
            let display = display_ref.read().await;
            for (id, route) in display.routes() {
                let cells: Vec<String> = route.cells.iter().map(|c| c.to_string()).collect();
                println!("{id}: cost {} [{}]", route.cost, cells.join(" "));
            }
        }
        ">" => {
            let (id, json) = rem.split_once(' ').context("usage: > <id> <json>")?;
            let msg = ObserverMsg::decode(json)?;
            context_ref.write().await.accept(id, msg);
        }
        _ => println!("input not recognized"),
    }
    Ok(())
}

/// `place <id> <x> <y> [floor] [role] [intent]`
fn parse_place<'a>(args: &[&'a str]) -> anyhow::Result<(&'a str, ObserverMsg)> {
    let [id, x, y, rest @ ..] = args else { bail!("usage: place <id> <x> <y> [floor] [role] [intent]") };
    let floor = parse_floor(rest.first())?;
    let role = match rest.get(1) {
        Some(name) => Role::parse(name).with_context(|| format!("unknown role {name}"))?,
        None => Role::default(),
    };
    let intent = match rest.get(2) {
        Some(name) => Intent::parse(name).with_context(|| format!("unknown intent {name}"))?,
        None => Intent::default(),
    };
    Ok((*id, ObserverMsg::Position { x: x.parse()?, y: y.parse()?, floor, role, intent }))
}

/// `hazard <x> <y> [floor]`
fn parse_hazard(args: &[&str]) -> anyhow::Result<ObserverMsg> {
    let [x, y, rest @ ..] = args else { bail!("usage: hazard <x> <y> [floor]") };
    Ok(ObserverMsg::ToggleHazard { x: x.parse()?, y: y.parse()?, floor: parse_floor(rest.first())? })
}

fn parse_floor(arg: Option<&&str>) -> anyhow::Result<i32> {
    match arg {
        Some(floor) => floor.parse().with_context(|| format!("bad floor {floor}")),
        None => Ok(DEFAULT_FLOOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_defaults_like_the_wire_schema() {
        let (id, msg) = parse_place(&["guard", "3", "4"]).unwrap();
        assert_eq!(id, "guard");
        assert_eq!(msg, ObserverMsg::Position { x: 3, y: 4, floor: 1, role: Role::Civilian, intent: Intent::Evacuate });

        let (_, msg) = parse_place(&["r1", "8", "8", "2", "responder", "seek-hazard"]).unwrap();
        assert_eq!(msg, ObserverMsg::Position { x: 8, y: 8, floor: 2, role: Role::Responder, intent: Intent::SeekHazard });
    }

    #[test]
    fn bad_console_arguments_are_errors() {
        assert!(parse_place(&["only-id"]).is_err());
        assert!(parse_place(&["a", "1", "1", "1", "pilot"]).is_err());
        assert!(parse_hazard(&["x", "1"]).is_err());
        assert_eq!(parse_hazard(&["2", "2"]).unwrap(), ObserverMsg::ToggleHazard { x: 2, y: 2, floor: 1 });
    }
}
