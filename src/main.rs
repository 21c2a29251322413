use chrono::Datelike;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitwrap::report::{self, Metric, YearInReview};
use gitwrap::{Config, GitHubClient};

#[derive(Parser, Debug)]
#[command(name = "gitwrap")]
#[command(version = "0.1.0")]
#[command(about = "Generate a GitHub year-in-review for a user")]
struct Args {
    /// GitHub username to summarize
    #[arg(short, long)]
    username: String,

    /// Calendar year to summarize (defaults to the current UTC year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Hour offset from UTC for the commit-time histogram
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    timezone_offset: i32,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitwrap=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;
    let client = GitHubClient::new(&config)?;

    let year = args.year.unwrap_or_else(|| chrono::Utc::now().year());

    tracing::info!("Summarizing {} activity for GitHub user: {}", year, args.username);
    let review = report::generate(&client, &args.username, year, args.timezone_offset).await;

    output_review(&review, &args)?;

    Ok(())
}

fn output_review(review: &YearInReview, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(review)?,
        "markdown" => format_markdown(review),
        _ => format_text(review),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn render<T>(metric: &Metric<T>, describe: impl Fn(&T) -> String) -> String {
    match metric {
        Metric::Ready(value) => describe(value),
        Metric::Unavailable { error } => format!("unavailable ({})", error),
    }
}

fn format_text(review: &YearInReview) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n=== GitHub Year in Review: {} ({}) ===\n\n",
        review.username, review.year
    ));

    if let Some(profile) = review.profile.as_ready() {
        if let Some(ref name) = profile.name {
            output.push_str(&format!("Name: {}\n", name));
        }
        if let Some(ref website) = profile.website_url {
            output.push_str(&format!("Website: {}\n", website));
        }
        if let Some(ref twitter) = profile.twitter_username {
            output.push_str(&format!("Twitter: @{}\n", twitter));
        }
        for account in &profile.social_accounts {
            if let (Some(provider), Some(url)) = (&account.provider, &account.url) {
                output.push_str(&format!("{}: {}\n", provider, url));
            }
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "Total commits: {}\n",
        render(&review.total_commits, |c| c.to_string())
    ));
    output.push_str(&format!(
        "Most active repo: {}\n",
        render(&review.most_active_repo, |m| match &m.repo {
            Some(repo) => format!("{} ({} commits)", repo, m.commits),
            None => "none".to_string(),
        })
    ));
    output.push_str(&format!(
        "Streaks: {}\n",
        render(&review.streaks, |s| format!(
            "longest {} days, longest break {} days, current {} days",
            s.longest_streak, s.longest_break, s.current_streak
        ))
    ));
    output.push_str(&format!(
        "Commit times: {}\n",
        render(&review.commit_times, |c| format!(
            "{}% {} (day: {}, night: {})",
            c.difference, c.period, c.early_bird, c.night_owl
        ))
    ));
    output.push_str(&format!(
        "Pull requests: {}\n",
        render(&review.pull_requests, |p| format!(
            "{} opened, {} merged",
            p.opened, p.merged
        ))
    ));
    output.push_str(&format!(
        "Collaborations: {}\n",
        render(&review.collaborations, |c| c.to_string())
    ));
    output.push_str(&format!(
        "Repos created: {}\n",
        render(&review.repos_created, |repos| {
            if repos.is_empty() {
                "none".to_string()
            } else {
                repos.join(", ")
            }
        })
    ));
    output.push_str(&format!(
        "Stars received this year: {}\n",
        render(&review.stars_received, |s| s.to_string())
    ));
    output.push_str(&format!(
        "Stars given: {}\n",
        render(&review.stars_given, |stars| stars.len().to_string())
    ));
    output.push_str(&format!(
        "Lifetime stargazers: {}\n",
        render(&review.total_stargazers, |s| s.to_string())
    ));
    output.push_str(&format!(
        "New followers: {}\n",
        render(&review.followers, |f| f.count.to_string())
    ));
    output.push_str(&format!(
        "Top languages: {}\n",
        render(&review.top_languages, |langs| {
            if langs.is_empty() {
                "none".to_string()
            } else {
                langs
                    .iter()
                    .map(|l| format!("{} ({})", l.name, l.count))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        })
    ));

    if let Some(patterns) = review.activity_patterns.as_ready() {
        output.push_str("\nActivity by weekday:\n");
        for pattern in patterns {
            output.push_str(&format!("  {:<9} {}\n", pattern.day, pattern.commits));
        }
    }

    output.push_str(&format!(
        "\nGenerated on: {}\n",
        review.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn format_markdown(review: &YearInReview) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# GitHub Year in Review: {} ({})\n\n",
        review.username, review.year
    ));

    if let Some(profile) = review.profile.as_ready() {
        if let Some(ref name) = profile.name {
            output.push_str(&format!("**Name:** {}\n\n", name));
        }
    }

    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!(
        "| Total commits | {} |\n",
        render(&review.total_commits, |c| c.to_string())
    ));
    output.push_str(&format!(
        "| Most active repo | {} |\n",
        render(&review.most_active_repo, |m| match &m.repo {
            Some(repo) => format!("{} ({} commits)", repo, m.commits),
            None => "none".to_string(),
        })
    ));
    output.push_str(&format!(
        "| Longest streak | {} |\n",
        render(&review.streaks, |s| format!("{} days", s.longest_streak))
    ));
    output.push_str(&format!(
        "| Longest break | {} |\n",
        render(&review.streaks, |s| format!("{} days", s.longest_break))
    ));
    output.push_str(&format!(
        "| Commit times | {} |\n",
        render(&review.commit_times, |c| format!("{}% {}", c.difference, c.period))
    ));
    output.push_str(&format!(
        "| Pull requests | {} |\n",
        render(&review.pull_requests, |p| format!(
            "{} opened / {} merged",
            p.opened, p.merged
        ))
    ));
    output.push_str(&format!(
        "| Collaborations | {} |\n",
        render(&review.collaborations, |c| c.to_string())
    ));
    output.push_str(&format!(
        "| Stars received | {} |\n",
        render(&review.stars_received, |s| s.to_string())
    ));
    output.push_str(&format!(
        "| Stars given | {} |\n",
        render(&review.stars_given, |stars| stars.len().to_string())
    ));
    output.push_str(&format!(
        "| Lifetime stargazers | {} |\n",
        render(&review.total_stargazers, |s| s.to_string())
    ));
    output.push_str(&format!(
        "| New followers | {} |\n",
        render(&review.followers, |f| f.count.to_string())
    ));

    if let Some(langs) = review.top_languages.as_ready() {
        if !langs.is_empty() {
            output.push_str("\n## Top Languages\n\n");
            output.push_str("| Language | Repositories |\n|----------|--------------|\n");
            for lang in langs {
                output.push_str(&format!("| {} | {} |\n", lang.name, lang.count));
            }
        }
    }

    if let Some(breakdown) = review.languages.as_ready() {
        if !breakdown.breakdown.is_empty() {
            output.push_str("\n## New Repositories\n\n");
            output.push_str("| Repository | Languages |\n|------------|-----------|\n");
            for repo in &breakdown.breakdown {
                output.push_str(&format!(
                    "| {} | {} |\n",
                    repo.repo,
                    repo.languages.join(", ")
                ));
            }
        }
    }

    output.push_str(&format!(
        "\n---\n*Generated on {}*\n",
        review.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
