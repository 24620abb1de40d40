use clap::Subcommand;

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum CoachAction {
    /// Send a message and print the coach's reply
    Say {
        /// Message text
        message: String,
    },
    /// Print the whole conversation
    History,
}

pub async fn run(action: CoachAction) -> CmdResult {
    let mut session = Session::open()?;

    match action {
        CoachAction::Say { message } => {
            let gateway = session.gateway()?;
            if !gateway.is_configured() {
                tracing::info!("no API key configured; the coach will answer offline");
            }
            match session.dashboard.send_chat(&gateway, &message).await {
                Some(reply) => println!("{reply}"),
                None => return Err("message must not be blank".into()),
            }
            session.save()
        }
        CoachAction::History => print_json(session.dashboard.chat.messages()),
    }
}
