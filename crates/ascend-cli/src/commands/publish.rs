use crate::PlatformArg;
use anyhow::Result;
use ascend_browser::{ChromeFinder, ChromeLauncher};
use ascend_core::contract::CONSOLE_URL;
use ascend_core::flows::{AuthOutcome, SubmissionState, TeamSwitch};
use ascend_core::{
    Credentials, Error, FinishAction, Orchestrator, ReleaseConfig, RunReport, Timings,
    VerificationCodeProvider,
};
use async_trait::async_trait;
use clap::{ArgAction, Args};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Options of `ascend publish`
///
/// Required values are optional at the clap level so that a missing one is
/// reported as a `MissingArgument` naming the flag.
#[derive(Args, Clone)]
pub struct PublishArgs {
    /// Account used to sign in to App Store Connect
    #[arg(short, long, env = "ASCEND_LOGIN")]
    pub login: Option<String>,

    /// Password of the account
    #[arg(short, long, env = "ASCEND_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Apple ID of the application
    #[arg(long = "appleId", visible_alias = "id", value_name = "ID")]
    pub apple_id: Option<String>,

    /// "What's New in This Version" text
    #[arg(short = 'v', long = "versionInformation", value_name = "TEXT")]
    pub version_information: Option<String>,

    /// Build to attach, as shown in the build picker
    #[arg(short = 'b', long = "buildVersion", value_name = "BUILD")]
    pub build_version: Option<String>,

    /// Team to switch to before opening the app
    #[arg(short = 't', long = "teamName", value_name = "TEAM")]
    pub team_name: Option<String>,

    /// Promotional text
    #[arg(short = 'r', long = "promotionalText", value_name = "TEXT")]
    pub promotional_text: Option<String>,

    /// Run Chrome without a window
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pub headless: bool,

    /// Platform whose submission is updated
    #[arg(long, value_enum, default_value_t = PlatformArg::Ios)]
    pub platform: PlatformArg,

    /// Cookie file replayed before and written after the run
    #[arg(long, value_name = "PATH", default_value = "cookies.json")]
    pub cookies: PathBuf,

    /// Console entry URL
    #[arg(long, value_name = "URL", default_value = CONSOLE_URL)]
    pub url: String,

    /// Submit the version for review after saving
    #[arg(long)]
    pub submit_for_review: bool,

    /// Seconds to wait for each required element
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    pub timeout: u64,

    /// Seconds to wait for a verification code (default: no limit)
    #[arg(long, value_name = "SECONDS")]
    pub verification_timeout: Option<u64>,

    /// Path to Chrome binary (auto-detected if not specified)
    #[arg(long, value_name = "PATH")]
    pub chrome_path: Option<PathBuf>,
}

/// Validated `publish` options
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub release: ReleaseConfig,
    pub headless: bool,
    pub chrome_path: Option<PathBuf>,
    pub verification_timeout: Option<Duration>,
}

impl PublishArgs {
    /// Check required options in a fixed order and build the run configuration
    pub fn into_config(self) -> ascend_core::Result<PublishConfig> {
        let login = required(self.login, "--login | -l")?;
        let password = required(self.password, "--password | -p")?;
        let apple_id = required(self.apple_id, "--appleId | --id")?;
        let notes = required(self.version_information, "--versionInformation | -v")?;
        let build = required(self.build_version, "--buildVersion | -b")?;

        let timings = Timings::default().with_element_timeout(Duration::from_secs(self.timeout));
        let finish = if self.submit_for_review {
            FinishAction::SubmitForReview
        } else {
            FinishAction::Save
        };

        let mut release = ReleaseConfig::new(Credentials::new(login, password), apple_id, notes, build)
            .with_promotional_text(self.promotional_text.unwrap_or_default())
            .with_platform(self.platform.into())
            .with_console_url(self.url)
            .with_cookie_path(self.cookies)
            .with_finish(finish)
            .with_timings(timings);
        if let Some(team) = self.team_name.filter(|t| !t.is_empty()) {
            release = release.with_team(team);
        }

        Ok(PublishConfig {
            release,
            headless: self.headless,
            chrome_path: self.chrome_path,
            verification_timeout: self.verification_timeout.map(Duration::from_secs),
        })
    }
}

fn required(value: Option<String>, flag: &str) -> ascend_core::Result<String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::MissingArgument(flag.to_string())),
    }
}

pub fn execute(args: PublishArgs) -> Result<()> {
    // Validation happens before Chrome is looked up or launched
    let config = args.into_config()?;

    block_on(run(config))
}

/// Drive `future` on a fresh runtime
///
/// A prompt abandoned by the verification timeout keeps its blocking thread
/// parked on stdin, so the runtime is shut down with a bound instead of being
/// dropped.
fn block_on<F>(future: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(future);

    runtime.shutdown_timeout(Duration::from_millis(100));

    result
}

async fn run(config: PublishConfig) -> Result<()> {
    let finder = ChromeFinder::new(config.chrome_path.clone());
    let chrome_binary = finder.find()?;
    tracing::info!("Found Chrome at: {}", chrome_binary.display());

    let driver = ChromeLauncher::new(chrome_binary)
        .headless(config.headless)
        .launch()
        .await?;

    let codes = TerminalCodeProvider::new(config.verification_timeout);
    let report = Orchestrator::new(&config.release)
        .run(&driver, &codes)
        .await?;

    print_report(&config.release, &report);
    Ok(())
}

type LineSource = Arc<dyn Fn() -> io::Result<String> + Send + Sync>;

/// Asks for the device-verification code on stderr and reads it from stdin
///
/// Accepts a piped code as well as one typed at a terminal.
struct TerminalCodeProvider {
    timeout: Option<Duration>,
    source: LineSource,
}

impl TerminalCodeProvider {
    fn new(timeout: Option<Duration>) -> Self {
        Self::with_source(timeout, prompt_stdin)
    }

    fn with_source<S>(timeout: Option<Duration>, source: S) -> Self
    where
        S: Fn() -> io::Result<String> + Send + Sync + 'static,
    {
        Self {
            timeout,
            source: Arc::new(source),
        }
    }
}

fn prompt_stdin() -> io::Result<String> {
    use console::Term;

    Term::stderr().write_str("Verification code: ")?;
    read_code(&mut io::stdin().lock())
}

/// One line without its terminator; end of input is an error
fn read_code(reader: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before a verification code was entered",
        ));
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[async_trait]
impl VerificationCodeProvider for TerminalCodeProvider {
    async fn verification_code(&self) -> ascend_core::Result<String> {
        let source = Arc::clone(&self.source);
        let prompt = tokio::task::spawn_blocking(move || (*source)());

        let joined = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, prompt).await.map_err(|_| {
                Error::Verification(format!("no code entered within {:?}", limit))
            })?,
            None => prompt.await,
        };

        let code = joined.map_err(|e| Error::Verification(e.to_string()))??;
        Ok(code)
    }
}

fn print_report(config: &ReleaseConfig, report: &RunReport) {
    use console::style;

    println!("\n{}", style("Submission Updated").bold().green());
    println!("{}", style("==================").green());

    let auth = match report.auth {
        None => "reused saved session",
        Some(AuthOutcome::SignedIn) => "signed in",
        Some(AuthOutcome::DeviceTrusted) => "signed in, browser trusted",
    };
    println!("  Session:   {}", auth);

    if let Some(team) = &config.team {
        let status = match report.team {
            Some(TeamSwitch::Switched) => "switched",
            _ => "already active",
        };
        println!("  Team:      {} ({})", team, status);
    }

    println!("  App:       {} ({})", config.app_id, config.platform);
    match (&report.state, &report.created_version) {
        (SubmissionState::NoActiveSubmission, Some(version)) => {
            println!("  Version:   {} created", style(version).cyan())
        }
        _ => println!("  Version:   existing submission"),
    }
    println!("  Build:     {}", config.build_version);

    let finish = match report.finish {
        FinishAction::Save => "saved as draft",
        FinishAction::SubmitForReview => "submitted for review",
    };
    println!("  Result:    {}", style(finish).bold());
    println!("  Cookies:   {} saved to {}", report.cookies_saved, config.cookie_path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascend_core::Platform;
    use clap::Parser;
    use std::sync::{Mutex, mpsc};
    use std::time::Instant;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: PublishArgs,
    }

    fn parse(extra: &[&str]) -> PublishArgs {
        let mut argv = vec![
            "ascend",
            "--login",
            "dev@example.com",
            "--password",
            "hunter2",
            "--id",
            "1234567890",
            "-v",
            "Bug fixes",
            "-b",
            "4.2 (108)",
        ];
        argv.extend_from_slice(extra);
        TestCli::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_complete_arguments_build_config() {
        let config = parse(&[]).into_config().unwrap();

        assert_eq!(config.release.credentials.account, "dev@example.com");
        assert_eq!(config.release.app_id, "1234567890");
        assert_eq!(config.release.release_notes, "Bug fixes");
        assert_eq!(config.release.build_version, "4.2 (108)");
        assert_eq!(config.release.platform, Platform::Ios);
        assert_eq!(config.release.finish, FinishAction::Save);
        assert_eq!(config.release.console_url, CONSOLE_URL);
        assert!(config.release.team.is_none());
        assert!(config.release.promotional_text.is_empty());
        assert!(config.headless);
        assert!(config.verification_timeout.is_none());
    }

    #[test]
    fn test_optional_arguments() {
        let config = parse(&[
            "-t",
            "Widgets LLC",
            "-r",
            "Now faster",
            "--headless",
            "false",
            "--platform",
            "tvos",
            "--submit-for-review",
            "--timeout",
            "5",
            "--verification-timeout",
            "120",
        ])
        .into_config()
        .unwrap();

        assert_eq!(config.release.team.as_deref(), Some("Widgets LLC"));
        assert_eq!(config.release.promotional_text, "Now faster");
        assert_eq!(config.release.platform, Platform::Tvos);
        assert_eq!(config.release.finish, FinishAction::SubmitForReview);
        assert_eq!(config.release.timings.element_timeout, Duration::from_secs(5));
        assert_eq!(config.verification_timeout, Some(Duration::from_secs(120)));
        assert!(!config.headless);
    }

    #[test]
    fn test_missing_arguments_are_reported_in_order() {
        let mut args = parse(&[]);
        args.login = None;
        args.build_version = None;

        let err = args.into_config().unwrap_err();
        assert_eq!(err.to_string(), "Missing argument --login | -l");
    }

    #[test]
    fn test_empty_argument_counts_as_missing() {
        let mut args = parse(&[]);
        args.apple_id = Some(String::new());

        match args.into_config() {
            Err(Error::MissingArgument(flag)) => assert_eq!(flag, "--appleId | --id"),
            other => panic!("expected MissingArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_each_required_flag_is_named() {
        let cases: [(fn(&mut PublishArgs), &str); 5] = [
            (|a| a.login = None, "--login | -l"),
            (|a| a.password = None, "--password | -p"),
            (|a| a.apple_id = None, "--appleId | --id"),
            (|a| a.version_information = None, "--versionInformation | -v"),
            (|a| a.build_version = None, "--buildVersion | -b"),
        ];

        for (clear, flag) in cases {
            let mut args = parse(&[]);
            clear(&mut args);
            let err = args.into_config().unwrap_err();
            assert_eq!(err.to_string(), format!("Missing argument {}", flag));
        }
    }

    #[test]
    fn test_read_code_strips_line_ending() {
        let mut input = io::Cursor::new("481516\r\nignored\n");
        assert_eq!(read_code(&mut input).unwrap(), "481516");
    }

    #[test]
    fn test_read_code_fails_on_closed_input() {
        let mut input = io::Cursor::new("");
        let err = read_code(&mut input).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[tokio::test]
    async fn test_piped_code_reaches_provider() {
        let codes = TerminalCodeProvider::with_source(None, || {
            read_code(&mut io::Cursor::new("112358\n"))
        });

        assert_eq!(codes.verification_code().await.unwrap(), "112358");
    }

    #[tokio::test]
    async fn test_closed_input_is_an_error() {
        let codes = TerminalCodeProvider::with_source(None, || read_code(&mut io::empty()));

        assert!(matches!(codes.verification_code().await, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_verification_timeout_reports_exact_limit() {
        let codes = TerminalCodeProvider::with_source(Some(Duration::from_millis(10)), || {
            std::thread::sleep(Duration::from_millis(200));
            Ok("too late".to_string())
        });

        match codes.verification_code().await {
            Err(Error::Verification(msg)) => assert_eq!(msg, "no code entered within 10ms"),
            other => panic!("expected Verification error, got {:?}", other),
        }
    }

    #[test]
    fn test_abandoned_prompt_does_not_block_exit() {
        // Never receives: the prompt thread stays parked until the sender drops
        let (_sender, receiver) = mpsc::channel::<String>();
        let receiver = Mutex::new(receiver);
        let codes = TerminalCodeProvider::with_source(Some(Duration::from_millis(10)), move || {
            Ok(receiver.lock().unwrap().recv().unwrap_or_default())
        });

        let started = Instant::now();
        let result = block_on(async {
            codes.verification_code().await?;
            Ok::<_, anyhow::Error>(())
        });

        assert!(result.unwrap_err().to_string().contains("no code entered"));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_app_id_long_name() {
        let args = TestCli::try_parse_from(["ascend", "--appleId", "42"]).unwrap().args;
        assert_eq!(args.apple_id.as_deref(), Some("42"));
    }
}
