use std::io::Write as _;

use log::{error, info};
use search::{DuckDuckGoProvider, SearchProvider};
use service::{config::Config, logging::Logger, AppState};
use tokio::io::{AsyncBufReadExt, BufReader};
use web::NotificationService;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    let provider = match DuckDuckGoProvider::new(config.search_timeout()) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to build search client: {e}");
            std::process::exit(1);
        }
    };

    let search_limit = config.search_result_limit;
    let service = match NotificationService::start(AppState::new(config)).await {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to start notification endpoint: {e}");
            std::process::exit(1);
        }
    };

    println!("\n[+] Server started at {}", service.url());
    println!("[+] Open the link above in your phone's browser");
    println!("[+] Keep the page open to receive notifications");

    run_search_loop(&service, &provider, search_limit).await;

    info!("Shutting down");
    service.stop().await;
}

/// Interactive producer loop: one search per line of input, results
/// published as notification events. `sair` or end-of-input quits.
async fn run_search_loop(
    service: &NotificationService,
    provider: &dyn SearchProvider,
    search_limit: usize,
) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\nSearch term ('sair' to quit): ");
        let _ = std::io::stdout().flush();

        let query = match lines.next_line().await {
            Ok(Some(line)) => line.trim().to_string(),
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {e}");
                break;
            }
        };

        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("sair") || query.eq_ignore_ascii_case("exit") {
            break;
        }

        match provider.search(&query, search_limit).await {
            Ok(links) if !links.is_empty() => {
                for link in &links {
                    println!("Found: {}", link.url);
                }
                service.publish_links(format!("Pesquisa: {query}"), links);
            }
            Ok(_) => {
                service.publish_message(
                    "Erro na Pesquisa",
                    format!("Não foi possível encontrar resultados para '{query}'"),
                );
            }
            Err(e) => {
                error!("Search failed: {e}");
                service.publish_message(
                    "Erro na Pesquisa",
                    format!("Não foi possível encontrar resultados para '{query}'"),
                );
            }
        }
    }
}
