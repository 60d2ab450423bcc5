use crate::infra::{catalog_source, document_upload, price_range};
use bestfavour::catalog::{
    BrowserPhase, CatalogService, CatalogSource, CategoryDirectory, FilterCriteria, Listing,
    ListingBrowser, ProviderDirectory, SortKey,
};
use bestfavour::config::AppConfig;
use bestfavour::error::AppError;
use bestfavour::messaging::Inbox;
use bestfavour::onboarding::{
    BusinessType, DocumentUpload, DraftId, DraftUpdate, ExperienceBand, InMemoryDraftRepository,
    OfferedCategory, OnboardingForm, OnboardingService, OnboardingServiceError,
};
use bestfavour::session::{MemoryPreferenceStore, SessionStore};
use chrono::Utc;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Category slug, e.g. house-cleaning or plumbing
    pub(crate) category: String,
    /// Case-insensitive text matched against title, description and tags
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Lower price bound (inclusive, defaults to 0)
    #[arg(long)]
    pub(crate) min_price: Option<f64>,
    /// Upper price bound (inclusive, defaults to 200)
    #[arg(long)]
    pub(crate) max_price: Option<f64>,
    /// Only show listings available today
    #[arg(long)]
    pub(crate) available_now: bool,
    /// Sort key: relevance, rating, price-low, price-high, distance, availability
    #[arg(long, default_value_t = SortKey::Relevance)]
    pub(crate) sort: SortKey,
    /// CSV listing export to search instead of the configured catalog
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CategoriesArgs {
    /// Filter categories by title, description or subcategory
    #[arg(long)]
    pub(crate) query: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Category page opened by the listing browser portion of the demo
    #[arg(long, default_value = "house-cleaning")]
    pub(crate) category: String,
    /// CSV listing export to browse instead of the configured catalog
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Identity document attached during onboarding (image or PDF)
    #[arg(long)]
    pub(crate) identity_document: Option<PathBuf>,
    /// Proof of address attached during onboarding (image or PDF)
    #[arg(long)]
    pub(crate) address_proof: Option<PathBuf>,
    /// Skip the provider onboarding portion of the demo
    #[arg(long)]
    pub(crate) skip_onboarding: bool,
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs {
        category,
        query,
        min_price,
        max_price,
        available_now,
        sort,
        catalog,
    } = args;

    let config = AppConfig::load()?;
    let source = catalog_source(catalog, &config.catalog);
    let criteria = FilterCriteria::default()
        .with_query(query.unwrap_or_default())
        .with_price_range(price_range(min_price, max_price)?)
        .with_available_now(available_now)
        .with_sort(sort);

    let service = CatalogService::new(source.fetch()?);
    let result = service.search(&category, &criteria)?;

    println!("{} ({})", result.title, source.describe());
    println!(
        "Price ${:.0}-${:.0} | sort: {}{}",
        criteria.price_range.lo(),
        criteria.price_range.hi(),
        criteria.sort.label(),
        if criteria.available_now {
            " | available today"
        } else {
            ""
        }
    );
    render_listings(&result.listings);
    Ok(())
}

pub(crate) fn run_categories(args: CategoriesArgs) -> Result<(), AppError> {
    let directory = CategoryDirectory::standard();
    let query = args.query.unwrap_or_default();
    let matches = directory.search(&query);

    if matches.is_empty() {
        println!("No categories match '{}'", query);
        return Ok(());
    }

    for category in matches {
        println!("{} [{}]", category.title, category.id);
        println!("  {}", category.description);
        println!("  Includes: {}", category.subcategories.join(", "));
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        category,
        catalog,
        identity_document,
        address_proof,
        skip_onboarding,
    } = args;

    let config = AppConfig::load()?;
    let source = catalog_source(catalog, &config.catalog);

    println!("BestFavour marketplace demo");
    browse_listings(&category, &source, &config).await;

    println!("\nPopular services");
    for provider in ProviderDirectory::standard().popular(3) {
        println!(
            "- [{}] {} ({}, {}) {:.1}",
            provider.initials(),
            provider.name,
            provider.category,
            provider.location,
            provider.rating
        );
    }

    if !skip_onboarding {
        onboard_provider(identity_document.as_deref(), address_proof.as_deref());
    }

    println!("\nMessages");
    let mut inbox = Inbox::seeded();
    for conversation in inbox.conversations() {
        println!(
            "- {} [{}] {} ({} unread)",
            conversation.name, conversation.timestamp, conversation.last_message, conversation.unread
        );
    }
    match inbox.select(1) {
        Ok(conversation) => println!("  Opened conversation with {}", conversation.name),
        Err(err) => println!("  Conversation unavailable: {}", err),
    }
    if let Some(message) = inbox.send("Thanks, see you at 2 PM.", Utc::now()) {
        println!(
            "  {} @ {}: {}",
            message.sender, message.timestamp, message.content
        );
    }
    println!("  Unread across inbox: {}", inbox.unread_total());

    println!("\nSettings");
    let session = SessionStore::initialize(Arc::new(MemoryPreferenceStore::default()))?;
    if let Err(err) = session.login("", "") {
        println!("  Blank credentials rejected: {}", err);
    }
    match session.login("demo@bestfavour.co.za", "demo") {
        Ok(profile) => println!("  Signed in as {} <{}>", profile.name, profile.email),
        Err(err) => println!("  Sign-in failed: {}", err),
    }
    let dark_mode = session.toggle_dark_mode()?;
    println!("  Dark mode: {}", if dark_mode { "on" } else { "off" });
    session.logout()?;
    println!(
        "  Signed out (authenticated: {})",
        session.snapshot().is_authenticated()
    );

    Ok(())
}

async fn browse_listings(category: &str, source: &CatalogSource, config: &AppConfig) {
    let mut browser = ListingBrowser::open(Some(category));
    println!(
        "\nListings for '{}' from {} ({} ms simulated delay)",
        category,
        source.describe(),
        config.catalog.load_delay.as_millis()
    );
    browser.load(source, config.catalog.load_delay).await;

    if browser.phase() == BrowserPhase::Failed {
        println!("  {}", browser.error().unwrap_or("Failed to load services"));
        return;
    }

    let view = browser.view();
    if let Some(title) = &view.title {
        println!("{}", title);
    }
    render_listings(browser.results());

    browser.set_sort(SortKey::Rating);
    browser.set_available_now(true);
    println!("\nAvailable today, best rated first");
    render_listings(browser.results());
    if let Some(message) = browser.error() {
        println!("  {}", message);
    }
}

fn onboard_provider(identity: Option<&Path>, address: Option<&Path>) {
    println!("\nProvider onboarding");
    let service = OnboardingService::new(Arc::new(InMemoryDraftRepository::default()));

    let form = match service.start() {
        Ok(form) => form,
        Err(err) => {
            println!("  Draft unavailable: {}", err);
            return;
        }
    };
    let id = form.id().clone();
    println!("- Started draft {}", id);

    let identity = identity
        .map(document_upload)
        .unwrap_or_else(|| placeholder_upload("id-document.pdf"));
    let address = address
        .map(document_upload)
        .unwrap_or_else(|| placeholder_upload("proof-of-address.jpg"));

    let steps = [
        vec![
            DraftUpdate::FullName("Lerato Khumalo".to_string()),
            DraftUpdate::Email("lerato@khumalo-home.co.za".to_string()),
            DraftUpdate::Phone("+27 11 555 0142".to_string()),
            DraftUpdate::IdNumber("8506150123083".to_string()),
        ],
        vec![
            DraftUpdate::BusinessName("Khumalo Home Care".to_string()),
            DraftUpdate::BusinessType(BusinessType::Individual),
        ],
        vec![
            DraftUpdate::Category(OfferedCategory::HomeServices),
            DraftUpdate::Experience(ExperienceBand::ThreeToFive),
            DraftUpdate::Services(vec![
                "Deep cleaning".to_string(),
                "Ironing".to_string(),
            ]),
        ],
        vec![
            DraftUpdate::IdentityDocument(identity),
            DraftUpdate::AddressProof(address),
            DraftUpdate::TermsAccepted(true),
        ],
    ];

    let last = steps.len() - 1;
    for (index, updates) in steps.into_iter().enumerate() {
        let mut form = match apply_all(&service, &id, updates) {
            Ok(form) => form,
            Err(err) => {
                println!("  Update rejected: {}", err);
                return;
            }
        };
        print_progress(&form);
        if index < last {
            form = match service.next(&id) {
                Ok(form) => form,
                Err(err) => {
                    println!("  Navigation failed: {}", err);
                    return;
                }
            };
            println!("  -> {}", form.current_step().title());
        }
    }

    match service.submit(&id) {
        Ok(application) => {
            println!(
                "- Submitted at {}",
                application.submitted_at.format("%Y-%m-%d %H:%M UTC")
            );
            match serde_json::to_string_pretty(&application.draft) {
                Ok(json) => println!("  Application payload:\n{}", json),
                Err(err) => println!("  Application payload unavailable: {}", err),
            }
        }
        Err(err) => println!("  Submission rejected: {}", err),
    }
}

fn apply_all(
    service: &OnboardingService<InMemoryDraftRepository>,
    id: &DraftId,
    updates: Vec<DraftUpdate>,
) -> Result<OnboardingForm, OnboardingServiceError> {
    let mut form = service.get(id)?;
    for update in updates {
        form = service.apply(id, update)?;
    }
    Ok(form)
}

fn print_progress(form: &OnboardingForm) {
    let markers: Vec<String> = form
        .step_progress()
        .into_iter()
        .map(|entry| {
            let mark = if entry.reached { "x" } else { " " };
            format!("[{}] {}", mark, entry.title)
        })
        .collect();
    println!("  {}", markers.join("  "));
}

fn placeholder_upload(file_name: &str) -> DocumentUpload {
    document_upload(Path::new(file_name))
}

fn render_listings(listings: &[Listing]) {
    if listings.is_empty() {
        println!("  No services match the current filters");
        return;
    }

    for listing in listings {
        println!(
            "- {} by {} | ${:.0} {} | {:.1} ({} reviews) | {:.1} km | {}",
            listing.title,
            listing.provider,
            listing.price,
            listing.price_unit,
            listing.rating,
            listing.reviews,
            listing.distance,
            listing.availability
        );
        if !listing.tags.is_empty() {
            println!("  {}", listing.tags.join(" · "));
        }
    }
}
