//! Terminal front end — drives the wizard over stdin/stdout.
//!
//! Each step prints its own header when entered (the terminal equivalent of
//! scrolling the step card to the top) and owns the prompts for that step.
//! The status inspector is reachable from every step's choice prompt
//! (`status <app>`) without touching wizard state.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::api::{DeploymentResult, PortalApi};
use crate::catalog::format_template_tile;
use crate::error::{QueryError, Result, WizardError};
use crate::session::SessionState;
use crate::status::{self, STATUS_QUERY_ERROR, StatusReport, humanize_timestamp};
use crate::wizard::{CPU_OPTIONS, MEMORY_OPTIONS, build_request, submit};

// ANSI styling, in the portal CLI's palette.
pub const BOLD: &str = "\x1b[1m";
pub const HEADER: &str = "\x1b[95m";
pub const CYAN: &str = "\x1b[96m";
pub const GREEN: &str = "\x1b[92m";
pub const YELLOW: &str = "\x1b[93m";
pub const RED: &str = "\x1b[91m";
pub const RESET: &str = "\x1b[0m";

/// Interpret a prompt line as a status command. Accepted at every choice
/// prompt in the wizard, so a lookup is always one line away.
fn status_command(line: &str) -> Option<&str> {
    line.strip_prefix("status")
        .filter(|rest| rest.is_empty() || rest.starts_with(' '))
        .map(str::trim)
}

/// Choice typed at the step-3 confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReviewChoice {
    Deploy,
    Back,
    Status(String),
}

fn parse_review_choice(line: &str) -> Option<ReviewChoice> {
    if let Some(name) = status_command(line) {
        return Some(ReviewChoice::Status(name.to_string()));
    }
    match line.to_lowercase().as_str() {
        "" | "y" | "yes" => Some(ReviewChoice::Deploy),
        "n" | "no" | "b" | "back" => Some(ReviewChoice::Back),
        _ => None,
    }
}

/// Choice typed at a step-4 result prompt. Retry and back only make sense
/// after a failure; the success prompt treats empty input as quit.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ResultChoice {
    Retry,
    Back,
    StartOver,
    Quit,
    Status(String),
}

fn parse_result_choice(line: &str, after_failure: bool) -> Option<ResultChoice> {
    if let Some(name) = status_command(line) {
        return Some(ResultChoice::Status(name.to_string()));
    }
    match line.to_lowercase().as_str() {
        "r" | "retry" if after_failure => Some(ResultChoice::Retry),
        "b" | "back" if after_failure => Some(ResultChoice::Back),
        "s" | "start over" => Some(ResultChoice::StartOver),
        "q" | "quit" => Some(ResultChoice::Quit),
        "" if !after_failure => Some(ResultChoice::Quit),
        _ => None,
    }
}

/// Resolve a menu input against a 1-based menu of `len` entries. Empty input
/// takes the default, if there is one.
fn parse_menu_choice(input: &str, len: usize, default: Option<usize>) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return default;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n - 1),
        _ => None,
    }
}

/// The interactive wizard loop.
pub struct WizardUi {
    api: Arc<dyn PortalApi>,
    session: SessionState,
    lines: Lines<BufReader<Stdin>>,
}

impl WizardUi {
    pub fn new(api: Arc<dyn PortalApi>, session: SessionState) -> Self {
        Self {
            api,
            session,
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Run the wizard until the user quits or stdin closes.
    pub async fn run(mut self) -> Result<()> {
        loop {
            let proceed = match self.session.wizard.step() {
                crate::wizard::WizardStep::Selecting => self.step_select().await?,
                crate::wizard::WizardStep::Detailing => self.step_detail().await?,
                crate::wizard::WizardStep::Reviewing => self.step_review().await?,
                crate::wizard::WizardStep::Submitting => self.step_submit().await?,
            };
            if !proceed {
                return Ok(());
            }
        }
    }

    // ── Step 1: template selection ───────────────────────────────────

    async fn step_select(&mut self) -> Result<bool> {
        println!("\n{HEADER}Step 1 of 4 — Choose an application template{RESET}\n");
        for (i, template) in self.session.catalog.iter().enumerate() {
            println!("{}\n", format_template_tile(i + 1, template));
        }

        loop {
            let prompt = format!(
                "Select a template (1-{}), 'status <app>' to check an app, or 'quit': ",
                self.session.catalog.len()
            );
            let Some(line) = self.read_line(&prompt).await? else {
                return Ok(false);
            };

            if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("q") {
                return Ok(false);
            }
            if let Some(name) = status_command(&line) {
                self.run_status_query(name).await;
                continue;
            }
            if let Some(index) = parse_menu_choice(&line, self.session.catalog.len(), None) {
                let template = self.session.catalog[index].clone();
                self.session.wizard.select_template(template)?;
                return Ok(true);
            }
            println!(
                "{RED}Invalid choice. Please select a number between 1 and {}.{RESET}",
                self.session.catalog.len()
            );
        }
    }

    // ── Step 2: application details ──────────────────────────────────

    async fn step_detail(&mut self) -> Result<bool> {
        println!("\n{HEADER}Step 2 of 4 — Application configuration{RESET}\n");

        macro_rules! try_read {
            ($e:expr) => {
                match $e {
                    Some(v) => v,
                    None => return Ok(false),
                }
            };
        }

        // App name is sanitized on the way in; show the user what stuck.
        let current = self.session.wizard.fields.app_name().to_string();
        let prompt = format!("Application name (lowercase, alphanumeric with dashes) [{current}]: ");
        let raw = try_read!(self.read_line(&prompt).await?);
        if !raw.is_empty() {
            self.session.wizard.fields.set_app_name(&raw);
            let stored = self.session.wizard.fields.app_name();
            if stored != raw {
                println!("{YELLOW}Sanitized to: {stored}{RESET}");
            }
        }

        let current = self.session.wizard.fields.description.clone();
        let raw = try_read!(self.read_line(&format!("Description [{current}]: ")).await?);
        if !raw.is_empty() {
            self.session.wizard.fields.description = raw;
        }

        let current = self.session.wizard.fields.team_email.clone();
        let raw = try_read!(self.read_line(&format!("Team email [{current}]: ")).await?);
        if !raw.is_empty() {
            self.session.wizard.fields.team_email = raw;
        }

        // Framework: the template itself first, then its frameworks.
        let options = self.session.wizard.framework_options();
        println!("\nAvailable frameworks:");
        for (i, option) in options.iter().enumerate() {
            println!("{}. {}", i + 1, option.label);
        }
        let default_index = options
            .iter()
            .position(|o| o.token == self.session.wizard.fields.framework)
            .unwrap_or(0);
        let index = try_read!(
            self.pick_number(
                &format!("Select a framework (number) [{}]: ", default_index + 1),
                options.len(),
                Some(default_index),
            )
            .await?
        );
        self.session.wizard.fields.framework = options[index].token.clone();

        let port = self.session.wizard.fields.port;
        self.session.wizard.fields.port =
            try_read!(self.read_parsed(&format!("Application port [{port}]: "), port).await?);

        let replicas = self.session.wizard.fields.replicas;
        self.session.wizard.fields.replicas =
            try_read!(self.read_parsed(&format!("Initial replicas [{replicas}]: "), replicas).await?);

        println!("\n{HEADER}Resource configuration:{RESET}");
        let memory_request = self.session.wizard.fields.memory_request.clone();
        self.session.wizard.fields.memory_request =
            try_read!(self.pick_option("memory request", &MEMORY_OPTIONS, &memory_request).await?);
        let memory_limit = self.session.wizard.fields.memory_limit.clone();
        self.session.wizard.fields.memory_limit =
            try_read!(self.pick_option("memory limit", &MEMORY_OPTIONS, &memory_limit).await?);
        let cpu_request = self.session.wizard.fields.cpu_request.clone();
        self.session.wizard.fields.cpu_request =
            try_read!(self.pick_option("CPU request", &CPU_OPTIONS, &cpu_request).await?);
        let cpu_limit = self.session.wizard.fields.cpu_limit.clone();
        self.session.wizard.fields.cpu_limit =
            try_read!(self.pick_option("CPU limit", &CPU_OPTIONS, &cpu_limit).await?);

        match self.session.wizard.try_review() {
            Ok(()) => Ok(true),
            Err(WizardError::Validation(v)) => {
                // Stay on step 2; entered values are kept as the new defaults,
                // so only the offending field needs retyping.
                println!("\n{YELLOW}{v} (field: {}){RESET}", v.field());
                Ok(true)
            }
            Err(e) => Err(e.into()),
        }
    }

    // ── Step 3: review ───────────────────────────────────────────────

    async fn step_review(&mut self) -> Result<bool> {
        let fields = &self.session.wizard.fields;
        println!("\n{HEADER}Step 3 of 4 — Application summary{RESET}\n");
        println!("{BOLD}Name:{RESET} {}", fields.app_name());
        println!("{BOLD}Description:{RESET} {}", fields.description);
        println!("{BOLD}Team email:{RESET} {}", fields.team_email);
        println!("{BOLD}Framework:{RESET} {}", fields.framework);
        println!("{BOLD}Port:{RESET} {}", fields.port);
        println!("{BOLD}Replicas:{RESET} {}", fields.replicas);
        println!(
            "{BOLD}Memory:{RESET} {} (request) / {} (limit)",
            fields.memory_request, fields.memory_limit
        );
        println!(
            "{BOLD}CPU:{RESET} {} (request) / {} (limit)",
            fields.cpu_request, fields.cpu_limit
        );

        loop {
            let Some(line) = self
                .read_line("\nDeploy this application? [Y/n/b(ack)]: ")
                .await?
            else {
                return Ok(false);
            };
            match parse_review_choice(&line) {
                Some(ReviewChoice::Deploy) => {
                    self.session.wizard.begin_submit()?;
                    return Ok(true);
                }
                Some(ReviewChoice::Back) => {
                    self.session.wizard.back();
                    return Ok(true);
                }
                Some(ReviewChoice::Status(name)) => self.run_status_query(&name).await,
                None => println!("{RED}Please answer y, n, or b.{RESET}"),
            }
        }
    }

    // ── Step 4: submit and show the result ───────────────────────────

    async fn step_submit(&mut self) -> Result<bool> {
        // Retry re-runs the whole submission with the same stored form data.
        loop {
            println!("\n{HEADER}Step 4 of 4 — Deploying application...{RESET}");
            println!("⏳ Submitting onboarding request\n");

            let request = build_request(&self.session.wizard);
            let token = self.session.csrf_token.get().await;
            let result = submit(self.api.as_ref(), &request, token.as_deref()).await;
            self.session.wizard.record_result(result.clone());

            match &result {
                DeploymentResult::Success {
                    project_url,
                    dev_url,
                    prod_url,
                } => {
                    println!("{GREEN}✓ {BOLD}Application successfully deployed!{RESET}\n");
                    println!("Important links:");
                    println!("{BOLD}Repository:{RESET}      {project_url}");
                    println!("{BOLD}Development URL:{RESET} {dev_url}");
                    println!("{BOLD}Production URL:{RESET}  {prod_url}");
                    println!("\n{HEADER}Next steps:{RESET}");
                    println!("1. Clone the repository: {CYAN}git clone {project_url}{RESET}");
                    println!("2. Push code changes to trigger the pipeline");
                    println!("3. Watch the deployment in the CI/CD pipelines");
                    println!("4. Access the development environment at {CYAN}{dev_url}{RESET}");
                    println!("5. Promote to production through the pipeline when ready");

                    loop {
                        let Some(line) = self.read_line("\n[s]tart over or [q]uit: ").await?
                        else {
                            return Ok(false);
                        };
                        match parse_result_choice(&line, false) {
                            Some(ResultChoice::StartOver) => {
                                self.session.start_over();
                                return Ok(true);
                            }
                            Some(ResultChoice::Quit) => return Ok(false),
                            Some(ResultChoice::Status(name)) => {
                                self.run_status_query(&name).await;
                            }
                            _ => println!("{RED}Please answer s or q.{RESET}"),
                        }
                    }
                }
                DeploymentResult::Failure { message } => {
                    println!("{RED}✗ Deployment failed: {message}{RESET}");

                    let retry = loop {
                        let Some(line) = self
                            .read_line("\n[r]etry, [b]ack to review, [s]tart over, or [q]uit: ")
                            .await?
                        else {
                            return Ok(false);
                        };
                        match parse_result_choice(&line, true) {
                            Some(ResultChoice::Retry) => break true,
                            Some(ResultChoice::Back) => {
                                self.session.wizard.back();
                                break false;
                            }
                            Some(ResultChoice::StartOver) => {
                                self.session.start_over();
                                break false;
                            }
                            Some(ResultChoice::Quit) => return Ok(false),
                            Some(ResultChoice::Status(name)) => {
                                self.run_status_query(&name).await;
                            }
                            None => println!("{RED}Please answer r, b, s, or q.{RESET}"),
                        }
                    };
                    if retry {
                        continue;
                    }
                    return Ok(true);
                }
            }
        }
    }

    // ── Status inspector (modal) ─────────────────────────────────────

    async fn run_status_query(&mut self, name: &str) {
        match status::inspect(self.api.as_ref(), name).await {
            Ok(report) => render_status_report(&report),
            Err(QueryError::EmptyAppName) => {
                println!("{YELLOW}Please enter an application name{RESET}");
            }
            Err(QueryError::Api(_)) => {
                println!("{RED}{STATUS_QUERY_ERROR}{RESET}");
            }
        }
    }

    // ── Input helpers ────────────────────────────────────────────────

    /// Read one trimmed line; `None` means stdin closed.
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        use std::io::Write as _;
        print!("{prompt}");
        std::io::stdout().flush()?;
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }

    /// Read a 1-based menu choice, re-prompting until valid.
    async fn pick_number(
        &mut self,
        prompt: &str,
        len: usize,
        default: Option<usize>,
    ) -> Result<Option<usize>> {
        loop {
            let Some(line) = self.read_line(prompt).await? else {
                return Ok(None);
            };
            if let Some(name) = status_command(&line) {
                self.run_status_query(name).await;
                continue;
            }
            match parse_menu_choice(&line, len, default) {
                Some(index) => return Ok(Some(index)),
                None => println!("{RED}Please enter a number between 1 and {len}.{RESET}"),
            }
        }
    }

    /// Read a numeric field, keeping `default` on empty input and
    /// re-prompting on unparseable text. This is the upstream guard that
    /// keeps not-a-number values out of the deployment request.
    async fn read_parsed<T>(&mut self, prompt: &str, default: T) -> Result<Option<T>>
    where
        T: std::str::FromStr,
    {
        loop {
            let Some(line) = self.read_line(prompt).await? else {
                return Ok(None);
            };
            if line.is_empty() {
                return Ok(Some(default));
            }
            match line.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => println!("{RED}Please enter a number.{RESET}"),
            }
        }
    }

    /// Pick from a fixed option menu, defaulting to the current value.
    async fn pick_option(
        &mut self,
        label: &str,
        options: &[&str],
        current: &str,
    ) -> Result<Option<String>> {
        println!("{label} options:");
        for (i, option) in options.iter().enumerate() {
            println!("{}. {}", i + 1, option);
        }
        let default = options.iter().position(|o| *o == current).unwrap_or(0);
        let prompt = format!("Select {label} (number) [{} - {current}]: ", default + 1);
        Ok(self
            .pick_number(&prompt, options.len(), Some(default))
            .await?
            .map(|index| options[index].to_string()))
    }
}

/// Render a status report: one row per environment, or the error message.
/// Each invocation prints a fresh table; nothing accumulates.
pub fn render_status_report(report: &StatusReport) {
    match report {
        StatusReport::Found {
            app_name,
            environments,
        } => {
            println!("\n{HEADER}Status for {app_name}:{RESET}");
            for (name, env) in environments {
                let (color, marker) = if env.is_available() {
                    (GREEN, "✓")
                } else {
                    (YELLOW, "!")
                };
                println!("  {name}: {color}{marker} {}{RESET}", env.status);
                println!(
                    "    Last deployment: {}",
                    humanize_timestamp(&env.last_deployment)
                );
                println!("    URL: {}", env.url);
            }
        }
        StatusReport::NotFound { message } => {
            println!("{RED}{message}{RESET}");
        }
    }
}

/// Print the startup banner. Part of the UI, so it goes to stdout like
/// every other line.
pub fn print_banner(portal_url: &str) {
    println!("{}", banner(portal_url));
}

fn banner(portal_url: &str) -> String {
    format!(
        "{CYAN}{BOLD}1-Click Application Onboarding{RESET}\nPortal: {portal_url}\n{}",
        "-".repeat(60)
    )
}
