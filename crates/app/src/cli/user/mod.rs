use clap::{Args, Subcommand};
use vitrine_app::{
    accounts::{AccountsService, NewAccount, PgAccountsService},
    database::{self, Db},
};

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Register a new user account
    Create(CreateUserArgs),
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    /// Email address, used for sign-in
    #[arg(long)]
    email: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Plaintext password; hashed before storage
    #[arg(long)]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create_user(args).await,
    }
}

async fn create_user(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAccountsService::new(Db::new(pool));

    let account = service
        .register(NewAccount {
            email: args.email,
            name: args.name,
            password: args.password,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", account.uuid);
    println!("email: {}", account.email);

    Ok(())
}
