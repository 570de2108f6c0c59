//! services/client/src/bin/travel_planner.rs
//!
//! Interactive terminal front end: fill in the trip form, read the generated
//! plan, ask questions about it and save it as a PDF.

use client_lib::{
    config::Config,
    error::ClientError,
    planner::{
        render::{render_itinerary, render_turn},
        AppState, ChatError,
    },
};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use travel_planner_core::{
    Budget, ConversationTurn, RawPreferences, RecreationType, TripPreferences,
};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Planner service at {}", config.api_url);

    // --- 2. Wire the Components to the Service ---
    let app = AppState::from_config(&config)?;
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    // --- 3. Form -> Plan -> Conversation, until the user quits ---
    'session: loop {
        let Some(preferences) = read_form(&mut input).await? else {
            break;
        };

        println!("Generuję nowy plan podróży...");
        match app.planner.submit(preferences).await {
            Ok(plan) => println!("\n{}", render_itinerary(&plan)),
            Err(e) => {
                println!("Nie udało się wygenerować planu: {}", e);
                continue;
            }
        }

        println!("Zadaj pytanie o plan. /pdf zapisuje plan, /nowy tworzy nowy, /koniec kończy.");
        loop {
            let Some(line) = prompt(&mut input, ">", "").await? else {
                break 'session;
            };
            match line.as_str() {
                "/koniec" => break 'session,
                "/nowy" => continue 'session,
                "/pdf" => match app.exporter.export_current().await {
                    Ok(saved) => println!(
                        "Zapisano plan: {} ({} B, {})",
                        saved.path.display(),
                        saved.size,
                        saved.saved_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S")
                    ),
                    Err(e) => println!("{}", e.notice()),
                },
                _ => {
                    app.conversation.set_input(line).await;
                    println!("Bot pisze...");
                    match app.conversation.send_input().await {
                        Ok(answer) => {
                            println!("{}", render_turn(&ConversationTurn::assistant(answer)))
                        }
                        Err(ChatError::EmptyQuestion) => {}
                        Err(e) => println!("Brak odpowiedzi: {}", e),
                    }
                }
            }
        }
    }

    info!("Session ended.");
    Ok(())
}

/// Asks for every form field until the answers validate. `None` on end of input.
async fn read_form(input: &mut Input) -> Result<Option<TripPreferences>, ClientError> {
    let budget_label = format!("Budżet ({})", Budget::ALL.map(Budget::label).join("/"));
    let kind_label = format!(
        "Rodzaj wyjazdu ({})",
        RecreationType::ALL.map(RecreationType::label).join("/")
    );

    loop {
        let mut form = RawPreferences::default();
        let fields: [(&str, &str, &mut String); 8] = [
            ("Miejsce wyjazdu", "", &mut form.destination),
            (budget_label.as_str(), Budget::Low.label(), &mut form.budget),
            (
                kind_label.as_str(),
                RecreationType::CultureAndTechnology.label(),
                &mut form.recreation_type,
            ),
            ("Zainteresowania (po przecinku)", "", &mut form.interests),
            ("Data wyjazdu", "", &mut form.date_range),
            ("Liczba osób", "1", &mut form.travelers_count),
            ("Dieta", "", &mut form.diet),
            ("Dodatkowe informacje", "", &mut form.additional_info),
        ];

        for (label, default, slot) in fields {
            match prompt(input, label, default).await? {
                Some(value) => *slot = value,
                None => return Ok(None),
            }
        }

        match form.collect() {
            Ok(preferences) => return Ok(Some(preferences)),
            Err(e) => println!("Popraw formularz: {}", e),
        }
    }
}

/// Prints `label` and reads one trimmed line, falling back to `default` when empty.
async fn prompt(
    input: &mut Input,
    label: &str,
    default: &str,
) -> Result<Option<String>, ClientError> {
    if default.is_empty() {
        print!("{} ", label);
    } else {
        print!("{} [{}] ", label, default);
    }
    std::io::stdout().flush()?;

    let Some(line) = input.next_line().await? else {
        return Ok(None);
    };
    let line = line.trim();
    Ok(Some(if line.is_empty() {
        default.to_string()
    } else {
        line.to_string()
    }))
}
