use std::io;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use saenggibu::config::Settings;
use saenggibu::error::{InputError, format_error_lines};
use saenggibu::flows::{run_variation, submit_assessment};
use saenggibu::llm::{self, KeySource};
use saenggibu::outcome::Generation;
use saenggibu::palette::Palette;
use saenggibu::render::{Presentation, print_presentation};
use saenggibu::request::{
    AssessmentForm, AssessmentVariant, DEFAULT_VARIATIONS, GenerationRequest, MAX_VARIATIONS,
    MIN_VARIATIONS, SchoolLevel,
};
use saenggibu::tui;

const LOG_ENV: &str = "SAENGGIBU_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "saenggibu",
    version,
    about = "교사 업무 지원: 문장 변형기와 세부능력 특기사항 작성기.",
    long_about = "교사 업무 지원 도구입니다.\n\n\
                  vary   입력한 문장을 의미는 유지하면서 여러 표현으로 변형합니다.\n\
                  assess 학교급/학년/과목/내용/성취수준을 바탕으로 5단계 수준별 세부능력 특기사항을 생성합니다.\n\n\
                  OpenAI API 키가 필요하며 사용량에 따라 비용이 발생할 수 있습니다.\n\
                  생성된 내용은 참고용으로만 사용하시기 바랍니다.",
    propagate_version = true,
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rephrase a sentence several ways while keeping its meaning
    Vary {
        /// Sentence to rephrase.
        #[arg(value_name = "SENTENCE")]
        sentence: String,
        /// How many variations to ask for.
        #[arg(
            short,
            long,
            value_name = "COUNT",
            default_value_t = DEFAULT_VARIATIONS,
            value_parser = clap::value_parser!(u8).range(MIN_VARIATIONS as i64..=MAX_VARIATIONS as i64)
        )]
        count: u8,
        /// Ask for the API key on the terminal instead of using the stored one.
        #[arg(long)]
        interactive_key: bool,
        /// Show results in a full-screen panel.
        #[arg(long)]
        tui: bool,
    },
    /// Write two evaluation comments for each of the five achievement tiers
    Assess(AssessArgs),
    /// Manage the LLM integration
    Llm {
        #[command(subcommand)]
        command: LlmCommand,
    },
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// School level.
    #[arg(long, value_enum)]
    school: SchoolLevel,
    /// Grade within the school level.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    grade: u8,
    /// Subject name (과목명).
    #[arg(long)]
    subject: String,
    /// Unit or learning content (학습 내용).
    #[arg(long)]
    content: String,
    /// Achievement level, or the curriculum achievement standard with --summary.
    #[arg(long)]
    achievement: String,
    /// Use the writing-policy prompt and also ask for three summary points.
    #[arg(long)]
    summary: bool,
    /// Show results in a full-screen panel.
    #[arg(long)]
    tui: bool,
}

#[derive(Subcommand, Debug)]
enum LlmCommand {
    /// Manage the stored API key
    Key {
        /// Store a new API key in the local keyring.
        #[arg(long, value_name = "KEY", conflicts_with_all = ["clear", "test"])]
        set: Option<String>,
        /// Remove the stored API key.
        #[arg(long, conflicts_with = "test")]
        clear: bool,
        /// Check the configured key against the completion API.
        #[arg(long)]
        test: bool,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(error) = run_cli().await {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Vary {
            sentence,
            count,
            interactive_key,
            tui,
        } => {
            let settings = Settings::load()?;
            let key_source = if interactive_key {
                KeySource::Interactive
            } else {
                KeySource::Store
            };
            let api_key = key_source.resolve()?;

            let request = match GenerationRequest::new(sentence, count) {
                Ok(request) => request,
                Err(err) => return report_input_error(err),
            };

            busy("문장 변형을 생성중입니다...");
            let outcome = match run_variation(&request, api_key.as_deref(), |key| {
                llm::connect(&settings, key)
            })
            .await
            {
                Ok(outcome) => outcome,
                Err(err) => return report_input_error(err),
            };
            present(
                "생성된 문장 변형",
                outcome.map(|variations| Presentation::variations(&variations)),
                tui,
            )?;
        }
        Command::Assess(args) => {
            let settings = Settings::load()?;
            let variant = if args.summary {
                AssessmentVariant::Extended
            } else {
                AssessmentVariant::Basic
            };
            let form = AssessmentForm {
                school: args.school,
                grade: args.grade,
                subject: args.subject,
                content: args.content,
                achievement: args.achievement,
            };

            let outcome = match submit_assessment(
                form,
                variant,
                llm::require_configured_api_key,
                |key| {
                    busy("세부능력 특기사항을 생성중입니다...");
                    llm::connect(&settings, key)
                },
            )
            .await
            {
                Ok(outcome) => outcome,
                Err(err) => return report_input_error(err),
            };
            present(
                "세부능력 특기사항",
                outcome.map(|report| Presentation::assessment(&report)),
                args.tui,
            )?;
        }
        Command::Llm { command } => match command {
            LlmCommand::Key { set, clear, test } => run_key_command(set, clear, test).await?,
        },
    }

    Ok(())
}

async fn run_key_command(set: Option<String>, clear: bool, test: bool) -> Result<()> {
    if let Some(key) = set {
        llm::store_api_key(&key)?;
        println!("API key stored in the local keyring.");
    } else if clear {
        if llm::clear_api_key()? {
            println!("Stored API key removed.");
        } else {
            println!("No stored API key to remove.");
        }
    } else if test {
        let settings = Settings::load()?;
        let source = llm::test_configured_api_key(&settings).await?;
        println!(
            "{} API key from the {} works.",
            Palette::paint(Palette::SUCCESS, "OK"),
            source.description()
        );
    } else {
        bail!("Pass one of --set <KEY>, --clear or --test.");
    }
    Ok(())
}

fn busy(message: &str) {
    eprintln!("{}", Palette::dim(message));
}

fn report_input_error(err: InputError) -> Result<()> {
    eprintln!("{}", Palette::paint(Palette::WARNING, err));
    Ok(())
}

fn present(title: &str, outcome: Generation<Presentation>, use_tui: bool) -> Result<()> {
    match outcome {
        Generation::Success(presentation) => {
            if use_tui {
                tui::show_results(title, &presentation)?;
            } else {
                print_presentation(&mut io::stdout().lock(), &presentation)?;
            }
        }
        Generation::Empty => {
            println!("{}", Palette::paint(Palette::WARNING, "생성된 결과가 없습니다."));
        }
        Generation::Failure(message) => {
            let lines = format_error_lines("오류가 발생했습니다:", &message);
            if use_tui {
                tui::show_failure(&lines)?;
            } else {
                for line in lines {
                    eprintln!("{}", Palette::paint(Palette::DANGER, line));
                }
            }
        }
    }
    Ok(())
}
