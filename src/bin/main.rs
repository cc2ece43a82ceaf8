use savings_advisor::{
    config::AdvisorConfig,
    gateway::HttpGateway,
    models::{CITY_TIERS, CURRENCIES, OCCUPATIONS},
    profile::NumericField,
    render, Advisor, ProfileForm,
};
use std::io::{self, BufRead, Write};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Keep the terminal clean; raise with RUST_LOG when debugging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AdvisorConfig::from_env()?;
    info!("Using analysis service at {}", config.base_url);

    let gateway = HttpGateway::new(&config)?;
    let mut advisor = Advisor::new(Box::new(gateway));
    let mut form = ProfileForm::new();

    println!("Savings Advisor — type 'help' for commands");
    print_profile(&form);

    let stdin = io::stdin();
    loop {
        prompt(&advisor);
        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "quit" | "exit" => break,
            "help" => print_help(),
            "profile" => print_profile(&form),
            "analyze" => match advisor.analyze(&form).await {
                Ok(()) => {
                    if let Some(result) = advisor.session().result() {
                        println!("\n{}", render::dashboard_summary(result));
                        println!("Advisor: {}\n", render::insight_plain(&result.ai_insight));
                    }
                }
                Err(e) => println!("Analysis failed: {}\n", e),
            },
            _ if input.starts_with("set ") => handle_set(&mut form, &input[4..]),
            message => {
                if advisor.session().result().is_none() {
                    println!("Run 'analyze' first to start the chat.");
                    continue;
                }
                match advisor.send_chat(message).await {
                    Some(reply) => println!("Advisor: {}\n", render::insight_plain(&reply.text)),
                    None => println!("(message not sent)"),
                }
            }
        }
    }

    Ok(())
}

fn prompt(advisor: &Advisor) {
    if advisor.session().result().is_some() {
        print!("chat> ");
    } else {
        print!("> ");
    }
    let _ = io::stdout().flush();
}

fn handle_set(form: &mut ProfileForm, args: &str) {
    let Some((field, value)) = args.split_once(' ') else {
        println!("Usage: set <field> <value>");
        return;
    };
    let field = field.trim();
    let value = value.trim();

    match field {
        "currency" if CURRENCIES.contains(&value) => form.currency = value.to_string(),
        "currency" => println!("Choose one of {:?}", CURRENCIES),
        "occupation" if OCCUPATIONS.contains(&value) => form.occupation = value.to_string(),
        "occupation" => println!("Choose one of {:?}", OCCUPATIONS),
        "city_tier" if CITY_TIERS.contains(&value) => form.city_tier = value.to_string(),
        "city_tier" => println!("Choose one of {:?}", CITY_TIERS),
        _ => match numeric_field(field) {
            Some(numeric) => form.set_numeric_str(numeric, value),
            None => println!("Unknown field '{}'; see 'help'", field),
        },
    }
}

fn numeric_field(name: &str) -> Option<NumericField> {
    let field = match name {
        "age" => NumericField::Age,
        "income" => NumericField::Income,
        "savings_pct" | "desired_savings_pct" => NumericField::DesiredSavingsPct,
        "groceries" => NumericField::Groceries,
        "transport" => NumericField::Transport,
        "eating_out" => NumericField::EatingOut,
        "entertainment" => NumericField::Entertainment,
        "utilities" => NumericField::Utilities,
        "misc" => NumericField::Misc,
        _ => return None,
    };
    Some(field)
}

fn print_profile(form: &ProfileForm) {
    println!("\nProfile ({} / {} / {})", form.currency, form.occupation, form.city_tier);
    for (label, field) in [
        ("age", NumericField::Age),
        ("income", NumericField::Income),
        ("savings_pct", NumericField::DesiredSavingsPct),
        ("groceries", NumericField::Groceries),
        ("transport", NumericField::Transport),
        ("eating_out", NumericField::EatingOut),
        ("entertainment", NumericField::Entertainment),
        ("utilities", NumericField::Utilities),
        ("misc", NumericField::Misc),
    ] {
        println!("  {:<14} {}", label, form.get_numeric(field));
    }
    println!();
}

fn print_help() {
    println!("Commands:");
    println!("  profile                 show the current form values");
    println!("  set <field> <value>     edit a field (e.g. 'set income 20000')");
    println!("  analyze                 submit the profile for analysis");
    println!("  <anything else>         chat with the advisor (after analyze)");
    println!("  quit                    exit");
}
