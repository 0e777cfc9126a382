//! Routine Miner - Session Mining Engine
//!
//! Turns recorded desktop sessions into reports of repeated action routines.

use routine_miner::app::cli::{Cli, Commands, ConfigAction};
use routine_miner::app::config::Config;
use routine_miner::label::LabeledAction;
use routine_miner::patterns::PatternDetector;
use routine_miner::session::RecordingSession;
use routine_miner::sync::KeyframeSynchronizer;
use routine_miner::workflow::{demo_session, ScriptedLabeler, SessionPipeline};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Keyframes {
            input,
            output,
            tolerance,
            after_delay,
        } => {
            run_keyframes(&input, output, tolerance, after_delay, &config)?;
        }
        Commands::Analyze {
            input,
            min_length,
            min_occurrences,
            runs,
            output,
        } => {
            run_analyze(&input, min_length, min_occurrences, runs, output, &config)?;
        }
        Commands::Mine {
            input,
            min_length,
            min_occurrences,
            runs,
            output,
        } => {
            run_mine(&input, min_length, min_occurrences, runs, output, &config)?;
        }
        Commands::Demo {
            frames,
            events,
            duration,
            output,
        } => {
            run_demo(frames, events, duration, output, &config)?;
        }
        Commands::List { detailed } => {
            run_list(detailed)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Delete { name, force } => {
            run_delete(&name, force)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

fn run_keyframes(
    input: &std::path::Path,
    output: Option<std::path::PathBuf>,
    tolerance: Option<f64>,
    after_delay: Option<f64>,
    config: &Config,
) -> anyhow::Result<()> {
    info!("Extracting keyframes from {:?}", input);

    if !input.exists() {
        anyhow::bail!("Session file not found: {:?}", input);
    }

    let session = RecordingSession::load(input)?;

    info!(
        "Loaded session '{}' with {} frames and {} events",
        session.metadata.name,
        session.frame_count(),
        session.event_count()
    );

    // CLI flags override config values
    let mut sync_config = config.sync_config();
    if let Some(t) = tolerance {
        sync_config.tolerance = t;
    }
    if let Some(d) = after_delay {
        sync_config.after_delay = d;
    }

    let synchronizer = KeyframeSynchronizer::with_config(sync_config)?;
    let pairs = synchronizer.extract(&session);

    if pairs.is_empty() {
        warn!("No keyframe pairs extracted");
    }

    println!("\nKeyframe Extraction");
    println!("  Session: {}", session.metadata.name);
    println!("  Events:  {}", session.event_count());
    println!("  Pairs:   {}", pairs.len());

    for pair in &pairs {
        let marker = if pair.is_degenerate() { " (degenerate)" } else { "" };
        println!(
            "    event @ {:>7.3}s  before {:>7.3}s  after {:>7.3}s{}",
            pair.trigger.timestamp, pair.before.timestamp, pair.after.timestamp, marker
        );
    }

    if let Some(path) = output {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&pairs)?;
        std::fs::write(&path, json)?;
        info!("Saved keyframe pairs to {:?}", path);
        println!("  Output:  {:?}", path);
    }

    Ok(())
}

fn run_analyze(
    input: &std::path::Path,
    min_length: Option<usize>,
    min_occurrences: Option<usize>,
    runs: bool,
    output: Option<std::path::PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    info!("Analyzing session {:?}", input);

    if !input.exists() {
        anyhow::bail!("Session file not found: {:?}", input);
    }

    let session = RecordingSession::load(input)?;

    info!(
        "Loaded session '{}' with {} frames and {} events",
        session.metadata.name,
        session.frame_count(),
        session.event_count()
    );

    // CLI flags override config values
    let mut detector_config = config.detector_config();
    if let Some(l) = min_length {
        detector_config.min_length = l;
    }
    if let Some(o) = min_occurrences {
        detector_config.min_occurrences = o;
    }

    let pipeline = SessionPipeline::with_components(
        KeyframeSynchronizer::with_config(config.sync_config())?,
        PatternDetector::with_config(detector_config)?,
    );
    let labeler = ScriptedLabeler::new();

    let mut report = match pipeline.run(&session, &labeler) {
        Ok(r) => r,
        Err(e) => {
            error!("Pipeline failed: {}", e);
            anyhow::bail!("Analysis failed: {}", e);
        }
    };

    if runs {
        let detector = PatternDetector::with_config(detector_config)?;
        report.patterns = detector.detect_runs(&report.actions);
    }

    println!("{}", report.summary());

    if let Some(path) = output {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)?;
        info!("Saved report to {:?}", path);
        println!("\nSaved report to {:?}", path);
    }

    Ok(())
}

fn run_mine(
    input: &std::path::Path,
    min_length: Option<usize>,
    min_occurrences: Option<usize>,
    runs: bool,
    output: Option<std::path::PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    info!("Mining labeled actions from {:?}", input);

    if !input.exists() {
        anyhow::bail!("Actions file not found: {:?}", input);
    }

    let content = std::fs::read_to_string(input)?;
    let actions: Vec<LabeledAction> = serde_json::from_str(&content)?;

    info!("Loaded {} labeled actions", actions.len());

    // CLI flags override config values
    let mut detector_config = config.detector_config();
    if let Some(l) = min_length {
        detector_config.min_length = l;
    }
    if let Some(o) = min_occurrences {
        detector_config.min_occurrences = o;
    }

    let detector = PatternDetector::with_config(detector_config)?;
    let patterns = if runs {
        detector.detect_runs(&actions)
    } else {
        detector.detect(&actions)
    };

    println!("\nPattern Mining");
    println!("  Actions:  {}", actions.len());
    println!("  Patterns: {}", patterns.len());
    for pattern in &patterns {
        println!("    {}  {}", pattern.id(), pattern);
    }

    if let Some(path) = output {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&patterns)?;
        std::fs::write(&path, json)?;
        info!("Saved patterns to {:?}", path);
        println!("  Output:   {:?}", path);
    }

    Ok(())
}

fn run_demo(
    frames: usize,
    events: usize,
    duration: f64,
    output: Option<std::path::PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    info!(
        "Generating demo session with {} frames and {} events over {:.1}s",
        frames, events, duration
    );

    let session = demo_session(frames, events, duration);

    let pipeline = SessionPipeline::from_config(config)?;
    let labeler = ScriptedLabeler::new();
    let report = pipeline.run(&session, &labeler)?;

    println!("{}", report.summary());

    if let Some(path) = output {
        session.save(&path)?;
        info!("Saved demo session to {:?}", path);
        println!("\nSaved session to {:?}", path);
    }

    Ok(())
}

fn run_list(detailed: bool) -> anyhow::Result<()> {
    let sessions_dir = Cli::sessions_dir();

    if !sessions_dir.exists() {
        println!("No sessions found in {}", sessions_dir.display());
        println!("Generate one with: routine-miner demo --output <path>");
        return Ok(());
    }

    println!("Sessions in {:?}:", sessions_dir);

    let mut entries: Vec<_> = std::fs::read_dir(&sessions_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();

    entries.sort_by_key(|e| e.path());

    for entry in &entries {
        let path = entry.path();
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();

        if detailed {
            match RecordingSession::load(&path) {
                Ok(session) => {
                    let source = session.metadata.source.as_deref().unwrap_or("-");
                    println!(
                        "  {}  ({} frames, {} events, {:.1}s, source: {})",
                        file_name,
                        session.frame_count(),
                        session.event_count(),
                        session.duration(),
                        source
                    );
                }
                Err(_) => {
                    let fs_meta = entry.metadata()?;
                    println!("  {}  ({} bytes, failed to parse)", file_name, fs_meta.len());
                }
            }
        } else {
            println!("  {}", file_name);
        }
    }

    if entries.is_empty() {
        println!("  (none)");
        println!("Generate one with: routine-miner demo --output <path>");
    }

    Ok(())
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    // Create directories
    std::fs::create_dir_all(Cli::sessions_dir())?;
    std::fs::create_dir_all(Cli::reports_dir())?;

    println!("\nCreated directories:");
    println!("  Sessions: {:?}", Cli::sessions_dir());
    println!("  Reports: {:?}", Cli::reports_dir());

    Ok(())
}

fn run_delete(name: &str, force: bool) -> anyhow::Result<()> {
    let sessions_dir = Cli::sessions_dir();

    // Try exact filename first, then add .json extension
    let candidates = vec![
        sessions_dir.join(name),
        sessions_dir.join(format!("{}.json", name)),
    ];

    let target = candidates
        .into_iter()
        .find(|p| p.exists())
        .ok_or_else(|| anyhow::anyhow!("Session '{}' not found in {:?}", name, sessions_dir))?;

    if !force {
        // Show what will be deleted
        let file_size = std::fs::metadata(&target)?.len();
        println!("Will delete: {} ({} bytes)", target.display(), file_size);
        println!("Use --force to skip this prompt, or re-run with -f");
        return Ok(());
    }

    std::fs::remove_file(&target)?;
    info!("Deleted session: {}", target.display());
    println!("Deleted: {}", target.display());

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", toml_str);
        }
        ConfigAction::Get { key } => {
            let toml_str = config.to_toml()?;
            // Simple key lookup in TOML output
            let value = find_toml_value(&toml_str, &key);
            match value {
                Some(v) => println!("{} = {}", key, v),
                None => {
                    anyhow::bail!("Configuration key '{}' not found", key);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let config_path = Config::default_path();
            if !config_path.exists() {
                anyhow::bail!("No config file found. Run 'routine-miner init' first.");
            }

            // Load, modify, and save
            let mut toml_content = std::fs::read_to_string(&config_path)?;
            if set_toml_value(&mut toml_content, &key, &value) {
                std::fs::write(&config_path, &toml_content)?;
                println!("Set {} = {}", key, value);
            } else {
                anyhow::bail!("Failed to set '{}'. Key may not exist in config.", key);
            }
        }
        ConfigAction::Reset { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            let default_config = Config::default();
            default_config.save_default()?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}

/// Simple TOML value lookup by dotted key
fn find_toml_value<'a>(toml_str: &'a str, key: &str) -> Option<&'a str> {
    let parts: Vec<&str> = key.split('.').collect();
    let leaf_key = parts.last()?;

    // Find the right section
    let mut in_section = parts.len() == 1; // Top-level key
    let section_name = if parts.len() > 1 { parts[0] } else { "" };

    for line in toml_str.lines() {
        let trimmed = line.trim();

        // Check for section header
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let section = &trimmed[1..trimmed.len() - 1];
            in_section = section == section_name;
            continue;
        }

        if in_section {
            if let Some(eq_pos) = trimmed.find('=') {
                let line_key = trimmed[..eq_pos].trim();
                if line_key == *leaf_key {
                    return Some(trimmed[eq_pos + 1..].trim());
                }
            }
        }
    }

    None
}

/// Simple TOML value setter by dotted key
fn set_toml_value(toml_str: &mut String, key: &str, value: &str) -> bool {
    let parts: Vec<&str> = key.split('.').collect();
    let leaf_key = match parts.last() {
        Some(k) => *k,
        None => return false,
    };

    let section_name = if parts.len() > 1 { parts[0] } else { "" };
    let mut in_section = parts.len() == 1;
    let mut found = false;

    let lines: Vec<String> = toml_str.lines().map(|l| l.to_string()).collect();
    let mut new_lines = Vec::with_capacity(lines.len());

    for line in &lines {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let section = &trimmed[1..trimmed.len() - 1];
            in_section = section == section_name;
        }

        if in_section && !found {
            if let Some(eq_pos) = trimmed.find('=') {
                let line_key = trimmed[..eq_pos].trim();
                if line_key == leaf_key {
                    new_lines.push(format!("{} = {}", leaf_key, value));
                    found = true;
                    continue;
                }
            }
        }

        new_lines.push(line.clone());
    }

    if found {
        *toml_str = new_lines.join("\n");
        // Ensure trailing newline
        if !toml_str.ends_with('\n') {
            toml_str.push('\n');
        }
    }

    found
}
