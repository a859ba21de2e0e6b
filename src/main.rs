use clap::{Parser as ClapParser, Subcommand};
use conditional::{
    Struct,
    cli::{self, CheckOptions, CheckResult, CliError},
};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "conditional")]
#[command(about = "Evaluate pipeline step conditions such as `build.branch == 'main'`")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive evaluator (default)
    Repl,

    /// Validate and evaluate a single condition
    Check {
        /// The condition to evaluate
        condition: String,

        /// JSON object used as the scope (reads from stdin if piped)
        #[arg(short, long)]
        input: Option<String>,

        /// Expose environment variables as the `env` struct
        #[arg(long)]
        env: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("CONDITIONAL_LOG", "warn"))
        .init();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => run_repl(),
        Commands::Check {
            condition,
            input,
            env,
            syntax_only,
        } => run_check(condition, input, env, syntax_only),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_repl() -> Result<(), CliError> {
    let interactive = atty::is(atty::Stream::Stdin);
    let env = Struct::from_env();
    log::debug!("scope holds {} environment variables", env.len());
    let scope = Struct::new().with("env", env);

    if interactive {
        println!("Condition evaluator");
    }

    let stdin = io::stdin();
    cli::start(stdin.lock(), io::stdout(), &scope, interactive)?;
    Ok(())
}

fn run_check(
    condition: String,
    input: Option<String>,
    env: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        condition,
        input,
        env: env.then(Struct::from_env),
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid(expr) => println!("Syntax is valid: {}", expr),
        CheckResult::Success { expr, value } => {
            log::info!("evaluated {}", expr);
            println!("{}", value);
        }
    }
    Ok(())
}
