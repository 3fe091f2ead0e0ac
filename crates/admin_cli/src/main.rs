use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{Engine, EngineError, NewCategory, NewClient, NewProduct, NewUser};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "inventory_admin")]
#[command(about = "Admin utilities for the inventory (bootstrap users and catalog)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./inventory.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run schema migrations and exit (defaults to `up`).
    Migrate {
        #[command(subcommand)]
        action: Option<MigrateAction>,
    },
    #[command(flatten)]
    Data(DataCommand),
}

/// Commands that go through the engine on an up-to-date schema.
#[derive(Subcommand, Debug)]
enum DataCommand {
    User(User),
    Category(Category),
    Client(Client),
    Product(Product),
}

#[derive(Subcommand, Debug, Default, Clone, Copy, PartialEq, Eq)]
enum MigrateAction {
    /// Apply every pending migration.
    #[default]
    Up,
    /// Roll back every applied migration.
    Down,
    /// Drop all tables, then apply every migration.
    Fresh,
    /// Print applied and pending migrations.
    Status,
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Create a user; the password is read from the terminal.
    Create {
        #[arg(long)]
        username: String,
    },
}

#[derive(Args, Debug)]
struct Category {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    Create {
        #[arg(long)]
        name: String,
    },
    List,
}

#[derive(Args, Debug)]
struct Client {
    #[command(subcommand)]
    command: ClientCommand,
}

#[derive(Subcommand, Debug)]
enum ClientCommand {
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: Option<String>,
    },
}

#[derive(Args, Debug)]
struct Product {
    #[command(subcommand)]
    command: ProductCommand,
}

#[derive(Subcommand, Debug)]
enum ProductCommand {
    Create {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        /// Category id; repeat the flag for several categories.
        #[arg(long = "category")]
        categories: Vec<i32>,
    },
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Read a secret without echoing it (each key prints `*`).
fn read_secret(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;

    let mut secret = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => break,
            KeyCode::Backspace if secret.pop().is_some() => {
                execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                secret.push(ch);
                execute!(out, Print("*"))?;
            }
            _ => continue,
        }
        out.flush()?;
    }

    execute!(out, Print("\r\n"))?;
    out.flush()?;
    Ok(secret)
}

/// Prompt until the engine accepts the sign-up or a non-input error occurs.
async fn create_user(engine: &Engine, username: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    for _ in 0..3 {
        let password = read_secret("Password: ")?;
        let confirmation = read_secret("Confirm password: ")?;

        match engine
            .register_user(NewUser::new(username, password).confirmation(confirmation))
            .await
        {
            Ok(user) => {
                println!("created user: {} (id {})", user.username, user.id);
                return Ok(());
            }
            Err(EngineError::InvalidInput(msg)) => eprintln!("{msg}, try again."),
            Err(err) => return Err(err.into()),
        }
    }

    Err("too many attempts".into())
}

async fn migrate(
    db: &DatabaseConnection,
    action: MigrateAction,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match action {
        MigrateAction::Up => migration::Migrator::up(db, None).await?,
        MigrateAction::Down => migration::Migrator::down(db, None).await?,
        MigrateAction::Fresh => migration::Migrator::fresh(db).await?,
        MigrateAction::Status => migration::Migrator::status(db).await?,
    }
    println!("migrate {action:?}: done");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = Database::connect(&cli.database_url).await?;

    match cli.command {
        Command::Migrate { action } => migrate(&db, action.unwrap_or_default()).await,
        Command::Data(command) => {
            migration::Migrator::up(&db, None).await?;
            let engine = Engine::builder().database(db).build().await?;
            run(&engine, command).await
        }
    }
}

async fn run(engine: &Engine, command: DataCommand) -> Result<(), Box<dyn Error + Send + Sync>> {
    match command {
        DataCommand::User(User {
            command: UserCommand::Create { username },
        }) => create_user(engine, &username).await?,
        DataCommand::Category(Category { command }) => match command {
            CategoryCommand::Create { name } => {
                let category = engine.register_category(NewCategory::new(name)).await?;
                println!("created category: {}", category.id);
            }
            CategoryCommand::List => {
                for category in engine.list_categories().await? {
                    println!(
                        "{}\t{}",
                        category.id,
                        category.name.as_deref().unwrap_or("-")
                    );
                }
            }
        },
        DataCommand::Client(Client {
            command: ClientCommand::Create { name, address },
        }) => {
            let client = engine
                .register_client(NewClient { name, address })
                .await?;
            println!("created client: {} (id {})", client.name, client.id);
        }
        DataCommand::Product(Product {
            command:
                ProductCommand::Create {
                    code,
                    name,
                    categories,
                },
        }) => {
            let product = engine
                .register_product(NewProduct::new(code, name).categories(categories))
                .await?;
            println!(
                "created product: {} (id {}, {} categories)",
                product.code,
                product.id,
                product.categories.len()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("inventory_admin").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn bare_migrate_means_up() {
        let cli = parse(&["--database-url", "sqlite::memory:", "migrate"]);
        let Command::Migrate { action } = cli.command else {
            panic!("expected migrate");
        };
        assert_eq!(action.unwrap_or_default(), MigrateAction::Up);
    }

    #[test]
    fn migrate_actions_parse() {
        for (arg, expected) in [
            ("up", MigrateAction::Up),
            ("down", MigrateAction::Down),
            ("fresh", MigrateAction::Fresh),
            ("status", MigrateAction::Status),
        ] {
            let cli = parse(&["--database-url", "sqlite::memory:", "migrate", arg]);
            assert!(matches!(cli.command, Command::Migrate { action: Some(a) } if a == expected));
        }
    }

    #[test]
    fn product_categories_repeat() {
        let cli = parse(&[
            "product", "create", "--code", "P1", "--name", "Hammer", "--category", "1",
            "--category", "2",
        ]);
        let Command::Data(DataCommand::Product(Product {
            command: ProductCommand::Create { categories, .. },
        })) = cli.command
        else {
            panic!("expected product create");
        };
        assert_eq!(categories, vec![1, 2]);
    }
}
