use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use inquire::Text;

use crate::clients::http::HttpFetcher;
use crate::config::Settings;
use crate::models::article::Article;
use crate::models::doa::DoaItem;
use crate::runtime;
use crate::service::article_service::ArticleFeed;
use crate::service::clock::{Clock, FixedClock, SystemClock};
use crate::service::content_service::{ContentService, ContentSource};
use crate::service::display::{combined_date, format_date, format_hm, strip_html};
use crate::service::doa_service::{self, DoaCursor};
use crate::service::home_service::{HomeSummary, PrayerCard, build_home_summary, load_prayer_card};
use crate::service::myquran_service::{DoaSource, MyQuranService, PrayerSource, resolve_city};
use crate::service::routine_service::{self, RoutineCard, RoutineRow};

#[derive(Parser)]
#[command(name = "jadwal", version, about = "Jadwal sholat, rutinan, doa dan artikel")]
struct Cli {
    /// Evaluate at this local time instead of now, e.g. 2026-10-19T16:00:00
    #[arg(long, global = true)]
    at: Option<NaiveDateTime>,
    /// MyQuran city id, overrides CITY_ID
    #[arg(long, global = true)]
    city: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prayer times, nearest routine, today's doa and headlines
    Home,
    /// Today's prayer times and the next one
    Sholat,
    /// Live countdown to the next prayer
    Countdown,
    /// Weekly routine schedule
    Rutinan,
    /// Nearest upcoming routine
    Terdekat,
    /// Today's Hijri date
    Hijri,
    /// Look up a MyQuran city id by name
    Kota { name: Option<String> },
    Doa {
        #[command(subcommand)]
        command: DoaCommand,
    },
    Artikel {
        #[command(subcommand)]
        command: ArtikelCommand,
    },
}

#[derive(Subcommand)]
enum DoaCommand {
    /// A random doa
    Acak,
    /// Categories with their sizes
    Kategori { query: Option<String> },
    /// Doa in one category
    List {
        source: String,
        #[arg(long)]
        cari: Option<String>,
    },
    /// One doa by its position in a category
    Detail {
        source: String,
        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        index: i64,
    },
    /// One doa by id
    Id { id: i64 },
    /// Source keys known to MyQuran
    Sumber,
    /// Every doa
    Semua,
}

#[derive(Subcommand)]
enum ArtikelCommand {
    /// Latest articles
    List {
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Read one article
    Baca { slug: String },
}

pub async fn cli(settings: Settings) -> anyhow::Result<()> {
    let cli = Cli::parse();
    let http = HttpFetcher::new(settings.retry)?;
    let content = ContentService::new(http.clone(), &settings.base_api_url);
    let myquran = MyQuranService::new(http, &settings.myquran_base_url);
    let clock: Arc<dyn Clock> = match cli.at {
        Some(at) => Arc::new(FixedClock(at)),
        None => Arc::new(SystemClock::new(settings.timezone)),
    };
    let city_id = cli.city.clone().unwrap_or_else(|| settings.city_id.clone());
    let now = clock.now();

    match cli.command {
        Commands::Home => {
            let summary = build_home_summary(
                &content,
                &myquran,
                &myquran,
                &city_id,
                settings.hijri_adjustment,
                now,
            )
            .await;
            println!("{}", render_home(&summary));
        }
        Commands::Sholat => {
            let card = load_prayer_card(&myquran, &city_id, now).await?;
            println!("{}", render_prayer_card(&card));
        }
        Commands::Countdown => {
            runtime::run_countdown(&myquran, &city_id, clock.clone()).await?;
        }
        Commands::Rutinan => {
            let events = routine_service::load_events(&content).await?;
            let rows = routine_service::routine_rows(&events, now);
            if rows.is_empty() {
                println!("Belum ada jadwal rutinan.");
            }
            for row in &rows {
                println!("{}", render_routine_row(row));
            }
        }
        Commands::Terdekat => match routine_service::nearest_routine(&content, now).await? {
            Some(card) => println!("{}", render_routine_card(&card)),
            None => println!("Tidak ada rutinan dalam waktu dekat."),
        },
        Commands::Hijri => {
            let hijri = myquran.hijri_today(settings.hijri_adjustment).await?;
            println!("{}", combined_date(&format_date(now.date()), hijri.hijri_text()));
        }
        Commands::Kota { name } => {
            let name = match name {
                Some(name) => name,
                None => Text::new("Nama kota:").prompt().context("no city name supplied")?,
            };
            let city = resolve_city(&myquran, &name).await?;
            println!("CITY_ID={}\nCITY_NAME=\"{}\"", city.id, city.lokasi);
        }
        Commands::Doa { command } => run_doa(command, &myquran).await?,
        Commands::Artikel { command } => run_artikel(command, &content).await?,
    }
    Ok(())
}

async fn run_doa(command: DoaCommand, source: &dyn DoaSource) -> anyhow::Result<()> {
    match command {
        DoaCommand::Acak => println!("{}", render_doa(&source.random_doa().await?)),
        DoaCommand::Id { id } => println!("{}", render_doa(&source.doa_by_id(id).await?)),
        DoaCommand::Kategori { query } => {
            let categories = doa_service::category_counts(source).await?;
            for category in doa_service::filter_categories(&categories, query.as_deref().unwrap_or("")) {
                println!("{:<8} {} ({} doa)", category.key, category.title, category.count);
            }
        }
        DoaCommand::List { source: key, cari } => {
            let list = source.doa_by_source(&key).await?;
            let hits = doa_service::search_doa(&list, cari.as_deref().unwrap_or(""));
            if hits.is_empty() {
                println!("Doa tidak ditemukan.");
            }
            for (index, doa) in hits {
                println!("{:>3}. {}", index, doa.judul);
            }
        }
        DoaCommand::Detail { source: key, index } => {
            let list = source.doa_by_source(&key).await?;
            let cursor = DoaCursor::new(index, list.len());
            match cursor.current(&list) {
                Some(doa) => println!(
                    "{} {}\n\n{}",
                    doa_service::title_for_source(&key),
                    cursor.counter(),
                    render_doa(doa)
                ),
                None => println!("Belum ada doa di kategori ini."),
            }
        }
        DoaCommand::Sumber => {
            for key in source.doa_sources().await? {
                println!("{}", key);
            }
        }
        DoaCommand::Semua => {
            for doa in source.all_doa().await? {
                println!("[{}] {}", doa.source, doa.judul);
            }
        }
    }
    Ok(())
}

async fn run_artikel(command: ArtikelCommand, source: &dyn ContentSource) -> anyhow::Result<()> {
    match command {
        ArtikelCommand::List { pages } => {
            let mut feed = ArticleFeed::new();
            feed.refresh(source).await?;
            while feed.current_page() < pages && feed.load_more(source).await? {}
            if feed.articles().is_empty() {
                println!("Belum ada artikel.");
            }
            for article in feed.articles() {
                println!("{}", render_article_line(article));
            }
            if feed.has_more() {
                println!("... halaman {} dari {}", feed.current_page(), feed.meta().map(|m| m.last_page).unwrap_or(0));
            }
        }
        ArtikelCommand::Baca { slug } => {
            let article = source.article_detail(&slug).await?;
            println!("{}\n{}\n\n{}", article.title, article_meta(&article), strip_html(&article.content));
        }
    }
    Ok(())
}

fn article_meta(article: &Article) -> String {
    format!("{} • {}", article.category_name(), article.date_text())
}

pub fn render_article_line(article: &Article) -> String {
    format!("{} [{}]\n    {}", article.title, article.slug, article_meta(article))
}

pub fn render_doa(doa: &DoaItem) -> String {
    format!("{}\n\n{}\n\n{}", doa.judul, doa.arab, doa.indo)
}

pub fn render_prayer_card(card: &PrayerCard) -> String {
    let mut body = format!("{}\n", card.location);
    for (prayer, time) in card.times.iter() {
        let marker = if prayer == card.next.prayer { ">" } else { " " };
        body.push_str(&format!("{} {:<8} {}\n", marker, prayer.label(), format_hm(time)));
    }
    body.push_str(&runtime::render_frame(&card.next));
    body
}

pub fn render_routine_card(card: &RoutineCard) -> String {
    let mut body = format!("{}{}", card.title, if card.is_today { " (hari ini)" } else { "" });
    if let Some(speaker) = &card.speaker {
        body.push_str(&format!("\n{}", speaker));
    }
    body.push_str(&format!("\n{} • {}", card.date_text, card.time_text));
    if let Some(place) = &card.place {
        body.push_str(&format!("\n{}", place));
    }
    body
}

pub fn render_routine_row(row: &RoutineRow) -> String {
    let marker = if row.is_today { "*" } else { "-" };
    let mut line = format!("{} {:<7} {} | {}", marker, row.day, row.title, row.date_text);
    if !row.time_text.is_empty() {
        line.push_str(&format!(" {}", row.time_text));
    }
    if let Some(speaker) = &row.speaker {
        line.push_str(&format!(" | {}", speaker));
    }
    if let Some(place) = &row.place {
        line.push_str(&format!(" @ {}", place));
    }
    if let Some(holiday) = &row.holiday {
        line.push_str(&format!(" [{}]", holiday));
    }
    line
}

pub fn render_home(summary: &HomeSummary) -> String {
    let mut sections = vec![summary.date_text.clone()];
    sections.push(match &summary.prayer {
        Ok(card) => render_prayer_card(card),
        Err(err) => err.to_string(),
    });
    sections.push(match &summary.nearest_routine {
        Ok(Some(card)) => format!("Rutinan terdekat\n{}", render_routine_card(card)),
        Ok(None) => "Tidak ada rutinan dalam waktu dekat.".to_string(),
        Err(err) => err.to_string(),
    });
    sections.push(match &summary.doa {
        Ok(doa) => format!("Doa hari ini\n{}", render_doa(doa)),
        Err(err) => err.to_string(),
    });
    sections.push(match &summary.headlines {
        Ok(articles) if articles.is_empty() => "Belum ada artikel.".to_string(),
        Ok(articles) => articles
            .iter()
            .map(render_article_line)
            .collect::<Vec<_>>()
            .join("\n"),
        Err(err) => err.to_string(),
    });
    sections.join("\n\n")
}
