use anyhow::{bail, Context};
use msgs::observer_msg::ObserverMsg;
use msgs::role::{Intent, Role};
use msgs::{Floor, DEFAULT_FLOOR};

#[derive(Debug, PartialEq, Eq)]
pub enum ConsoleCmd {
    Send (ObserverMsg),
    Routes,
    Status,
    Quit,
}

impl ConsoleCmd {
    pub fn parse(input: &str) -> anyhow::Result<ConsoleCmd> {
        let (message_type, rem) = match input.find(' ') {
            Some(i) => (&input[..i], input[i+1..].trim()),
            None => (input, ""),
        };
        let args: Vec<&str> = rem.split_whitespace().collect();

        match message_type {
            "pos" => {
                let [x, y, rest @ ..] = args.as_slice() else { bail!("usage: pos <x> <y> [floor] [role] [intent]") };
                let role = match rest.get(1) {
                    Some(name) => Role::parse(name).with_context(|| format!("unknown role {name}"))?,
                    None => Role::default(),
                };
                let intent = match rest.get(2) {
                    Some(name) => Intent::parse(name).with_context(|| format!("unknown intent {name}"))?,
                    None => Intent::default(),
                };
                let floor = floor_arg(rest.first())?;
                Ok(ConsoleCmd::Send(ObserverMsg::Position { x: x.parse()?, y: y.parse()?, floor, role, intent }))
            }
            "hazard" => {
                let [x, y, rest @ ..] = args.as_slice() else { bail!("usage: hazard <x> <y> [floor]") };
                Ok(ConsoleCmd::Send(ObserverMsg::ToggleHazard { x: x.parse()?, y: y.parse()?, floor: floor_arg(rest.first())? }))
            }
            "clear" => {
                Ok(ConsoleCmd::Send(ObserverMsg::ClearHazards { floor: floor_arg(args.first())? }))
            }
            "withdraw" => Ok(ConsoleCmd::Send(ObserverMsg::Withdraw)),
            "routes" => Ok(ConsoleCmd::Routes),
            "status" => Ok(ConsoleCmd::Status),
            "quit" | "exit" => Ok(ConsoleCmd::Quit),
            _ => bail!("cmd not recognized"),
        }
    }
}

fn floor_arg(arg: Option<&&str>) -> anyhow::Result<Floor> {
    match arg {
        Some(floor) => floor.parse().with_context(|| format!("bad floor {floor}")),
        None => Ok(DEFAULT_FLOOR),
    }
}
