//! checkers CLI: play a game in the terminal through the same handler the chat
//! bot uses. Config from env (`.env` is loaded) and optional CLI args.

use anyhow::{Context, Result};
use bot_core::{dispatch, init_tracing, Chat, HandlerResponse, Message, User};
use checkers::Side;
use checkers_bot::{replies, BotConfig, CheckersHandler, GameSessions};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Terminal stand-ins for chat users; the chat is the white player's private chat.
const WHITE_PLAYER: i64 = 1;
const BLACK_PLAYER: i64 = 2;

#[derive(Parser)]
#[command(name = "checkers")]
#[command(about = "Checkers CLI: play against the AI or hot-seat, print the rules", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game; moves are read from stdin as A3-B4, chat commands work too.
    Play {
        /// Both seats are played from this terminal instead of Black being the AI.
        #[arg(long)]
        human: bool,
        /// Seed for the AI (overrides CHECKERS_AI_SEED).
        #[arg(short, long)]
        seed: Option<u64>,
        /// Print the game state as JSON after every reply.
        #[arg(long)]
        json: bool,
        /// Also print logs to the console.
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the rules.
    Rules,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            human,
            seed,
            json,
            verbose,
        } => {
            let mut config = BotConfig::load().context("Load config from env (CHECKERS_*)")?;
            if seed.is_some() {
                config.ai_seed = seed;
            }
            init_tracing(&config.log_file, verbose)?;
            play(config, human, json).await
        }
        Commands::Rules => {
            println!("{}", replies::RULES);
            Ok(())
        }
    }
}

struct Terminal {
    handler: CheckersHandler,
    sessions: GameSessions,
    chat: Chat,
    json: bool,
    sent: u64,
}

impl Terminal {
    fn message(&mut self, user_id: i64, content: &str) -> Message {
        self.sent += 1;
        let name = if user_id == WHITE_PLAYER { "White" } else { "Black" };
        let user = User {
            id: user_id,
            username: None,
            first_name: Some(name.to_string()),
        };
        Message::new(self.sent.to_string(), user, self.chat.clone(), content)
    }

    /// Sends one line as `user_id` and prints what comes back.
    async fn send(&mut self, user_id: i64, content: &str) -> Result<()> {
        let message = self.message(user_id, content);
        match dispatch(&self.handler, &message).await {
            Ok(HandlerResponse::Reply(text)) => println!("{}\n", text),
            Ok(HandlerResponse::Stop) => {}
            Ok(_) => println!("Moves look like A3-B4; /rules shows the rules, quit leaves.\n"),
            Err(e) => eprintln!("Error: {}\n", e),
        }

        if self.json {
            let snapshot = self
                .sessions
                .with_game(self.chat.id, |game| serde_json::to_string_pretty(&game.snapshot()))
                .await
                .transpose()?;
            if let Some(snapshot) = snapshot {
                println!("{}\n", snapshot);
            }
        }
        Ok(())
    }

    /// Seat whose turn it is, so hot-seat input is attributed to the right player.
    async fn sender(&self, human: bool) -> i64 {
        let turn = self
            .sessions
            .with_game(self.chat.id, |game| game.current_turn())
            .await;
        match turn {
            Some(Side::Black) if human => BLACK_PLAYER,
            _ => WHITE_PLAYER,
        }
    }

    async fn is_over(&self) -> bool {
        self.sessions
            .with_game(self.chat.id, |game| game.is_over())
            .await
            .unwrap_or(true)
    }
}

async fn play(config: BotConfig, human: bool, json: bool) -> Result<()> {
    let sessions = GameSessions::new(config.max_games);
    let mut terminal = Terminal {
        handler: CheckersHandler::new(sessions.clone(), &config),
        sessions,
        chat: Chat {
            id: WHITE_PLAYER,
            chat_type: "private".to_string(),
        },
        json,
        sent: 0,
    };

    info!(human, seed = ?config.ai_seed, "step: terminal game starting");

    if human {
        terminal.send(WHITE_PLAYER, "/checkers Black").await?;
        terminal.send(BLACK_PLAYER, "/join").await?;
    } else {
        terminal.send(WHITE_PLAYER, "/checkers").await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Read move from stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        let sender = terminal.sender(human).await;
        terminal.send(sender, line).await?;

        if terminal.is_over().await {
            break;
        }
    }

    info!("step: terminal game finished");
    Ok(())
}
