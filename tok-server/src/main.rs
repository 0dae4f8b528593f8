//! Linha de comando do tokenizador: anotação local, avaliação, servidor TCP e cliente.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tok_core::{
    load_reference, read_document, Annotator, InputMode, Language, NormalizationProfile,
    OutputFormat, ReferenceFormat, SegmentationPolicy, TokConfig, TokenizerEvaluator,
    UntokenizablePolicy, DEFAULT_LOOKAHEAD, DEFAULT_NAF_VERSION,
};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

mod client;
mod error;
mod server;

use error::AppError;

/// Tokenizador multilíngue baseado em regras
#[derive(Parser)]
#[command(name = "tok")]
#[command(about = "Tokenização, segmentação de sentenças e avaliação")]
#[command(version)]
struct Cli {
    /// Log detalhado (nível debug) em stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokeniza o texto de stdin e escreve o resultado em stdout
    Tok(AnnotateOptions),
    /// Avalia a tokenização de stdin contra um arquivo de referência
    Eval(EvalOptions),
    /// Inicia o servidor TCP
    Server(ServerOptions),
    /// Envia o texto de stdin ao servidor TCP
    Client(ClientOptions),
}

/// Opções comuns ao motor de tokenização
#[derive(Args)]
struct TokOptions {
    /// Idioma: de, en, es, eu, fr, gl, it, nl, pl
    #[arg(short, long, default_value = "en")]
    lang: Language,

    /// Normalização por corpus: default, alpino, ancora, ctag, ptb, tiger, tutpenn
    #[arg(short, long, default_value = "default")]
    normalize: NormalizationProfile,

    /// Imprime caracteres não tokenizáveis (yes) ou os omite (no)
    #[arg(short, long, default_value = "no")]
    untokenizable: UntokenizablePolicy,

    /// Fronteira de sentença em quebras de linha: no, single, double
    #[arg(long = "segmentOnLinebreak", alias = "segment-on-linebreak", default_value = "no")]
    segment_on_linebreak: SegmentationPolicy,
}

impl TokOptions {
    fn config(&self) -> TokConfig {
        TokConfig::new(self.lang)
            .with_normalization(self.normalize)
            .with_untokenizable(self.untokenizable)
            .with_segmentation(self.segment_on_linebreak)
    }
}

#[derive(Args)]
struct AnnotateOptions {
    #[command(flatten)]
    tok: TokOptions,

    /// Formato de saída: oneline, conll, naf
    #[arg(short, long = "outputFormat", alias = "output-format", default_value = "naf")]
    output_format: OutputFormat,

    /// Omite offset e comprimento na saída conll
    #[arg(long)]
    no_offsets: bool,

    /// Entrada já tokenizada: uma sentença por linha, tokens separados por espaço
    #[arg(long, conflicts_with = "inputkaf")]
    notok: bool,

    /// Entrada é um documento estruturado (JSON); o texto bruto é re-tokenizado
    #[arg(long)]
    inputkaf: bool,

    /// Versão declarada no cabeçalho da saída estruturada
    #[arg(long = "kafversion", alias = "naf-version", default_value = DEFAULT_NAF_VERSION)]
    naf_version: String,
}

impl AnnotateOptions {
    fn config(&self) -> TokConfig {
        let input = if self.notok {
            InputMode::Pretokenized
        } else if self.inputkaf {
            InputMode::Structured
        } else {
            InputMode::Raw
        };
        self.tok
            .config()
            .with_output(self.output_format)
            .with_offsets(!self.no_offsets)
            .with_input(input)
            .with_naf_version(self.naf_version.as_str())
    }
}

#[derive(Args)]
struct EvalOptions {
    #[command(flatten)]
    tok: TokOptions,

    /// Arquivo de referência
    #[arg(short, long, value_name = "PATH")]
    reference: PathBuf,

    /// Formato da referência: tokenline, sentenceline
    #[arg(short, long = "inputFormat", alias = "input-format", default_value = "tokenline")]
    input_format: ReferenceFormat,

    /// Janela de ressincronização do alinhamento, em tokens
    #[arg(long, default_value_t = DEFAULT_LOOKAHEAD)]
    lookahead: usize,
}

#[derive(Args)]
struct ServerOptions {
    #[command(flatten)]
    annotate: AnnotateOptions,

    /// Porta do servidor
    #[arg(short, long)]
    port: u16,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,
}

#[derive(Args)]
struct ClientOptions {
    /// Porta do servidor
    #[arg(short, long)]
    port: u16,

    #[arg(long, default_value = "localhost")]
    host: String,
}

/// Logs vão para stderr; stdout fica só com a saída da anotação.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Tok(options) => run_tok(options),
        Commands::Eval(options) => run_eval(options),
        Commands::Server(options) => run_server(options).await,
        Commands::Client(options) => run_client(options).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_tok(options: AnnotateOptions) -> Result<(), AppError> {
    let config = options.config();
    debug!(?config, "anotando stdin");
    let text = read_document(io::stdin().lock())?;
    let output = Annotator::new(config).process(&text)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn run_eval(options: EvalOptions) -> Result<(), AppError> {
    let annotator = Annotator::new(options.tok.config());
    let text = read_document(io::stdin().lock())?;
    let hypothesis = annotator.surfaces(&text)?;
    let reference = load_reference(&options.reference, options.input_format)?;
    info!(
        reference = reference.len(),
        hypothesis = hypothesis.len(),
        format = %options.input_format,
        "avaliando tokenização"
    );

    let result = TokenizerEvaluator::new(options.lookahead).evaluate(&reference, &hypothesis);
    println!("TP: {}  FP: {}  FN: {}", result.true_positive, result.false_positive, result.false_negative);
    println!("Precision: {:.4}", result.precision);
    println!("Recall: {:.4}", result.recall);
    println!("Final F-Score: {:.4}", result.f_score);
    Ok(())
}

async fn run_server(options: ServerOptions) -> Result<(), AppError> {
    let annotator = Arc::new(Annotator::new(options.annotate.config()));
    let listener = TcpListener::bind((options.host.as_str(), options.port)).await?;
    server::serve(listener, annotator).await
}

async fn run_client(options: ClientOptions) -> Result<(), AppError> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    let response = client::send_document(&options.host, options.port, &text).await?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(response.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_tok_options_build_config() {
        let cli = Cli::parse_from([
            "tok", "tok", "-l", "fr", "-n", "ptb", "-u", "yes", "--segmentOnLinebreak", "double",
            "-o", "conll", "--no-offsets", "--notok",
        ]);
        let Commands::Tok(options) = cli.command else {
            panic!("esperava o subcomando tok");
        };
        let config = options.config();
        assert_eq!(config.language, Language::Fr);
        assert_eq!(config.normalization, NormalizationProfile::Ptb);
        assert_eq!(config.untokenizable, UntokenizablePolicy::Report);
        assert_eq!(config.segment_on_linebreak, SegmentationPolicy::Double);
        assert_eq!(config.output_format, OutputFormat::Conll);
        assert!(!config.offsets);
        assert_eq!(config.input, InputMode::Pretokenized);
        assert_eq!(config.naf_version, DEFAULT_NAF_VERSION);
    }

    #[test]
    fn test_kafversion_option() {
        let cli = Cli::parse_from(["tok", "tok", "--kafversion", "v3.naf"]);
        let Commands::Tok(options) = cli.command else {
            panic!("esperava o subcomando tok");
        };
        assert_eq!(options.config().naf_version, "v3.naf");
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        assert!(Cli::try_parse_from(["tok", "tok", "-l", "xx"]).is_err());
    }

    #[test]
    fn test_eval_defaults() {
        let cli = Cli::parse_from(["tok", "eval", "-r", "ref.txt"]);
        let Commands::Eval(options) = cli.command else {
            panic!("esperava o subcomando eval");
        };
        assert_eq!(options.input_format, ReferenceFormat::TokenLine);
        assert_eq!(options.lookahead, DEFAULT_LOOKAHEAD);
    }
}
