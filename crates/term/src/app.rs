//! Command dispatch.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use bricky_cart::{AddToCart, CartHost, CartSync, Outcome, ShippingSelector};
use bricky_client::{HttpTransport, StorefrontClient};
use bricky_config::Config;
use bricky_consent::{ConsentController, FileStore};
use bricky_primitives::{ItemId, Money, ProductId};
use bricky_storefront::{Autocomplete, Lookup, Newsletter, NewsletterForm};

use crate::cli::{CartAction, Cli, Command, ConsentAction};
use crate::host::{
	TermCart, TermDialog, TermNavigator, TermNewsletterForm, TermNotifier, TermPrompt, TermSuggestions, TermToggles,
};

const CART_PAGE: &str = "/orders/cart/";

type Client = Arc<StorefrontClient<HttpTransport>>;

/// Everything a command needs besides its own arguments.
struct Session {
	config: Config,
	cookie: Option<String>,
	assume_yes: bool,
}

impl Session {
	fn client(&self, page_path: &str) -> anyhow::Result<Client> {
		let mut transport = HttpTransport::new(&self.config.base_url)
			.with_context(|| format!("building HTTP client for {}", self.config.base_url))?;
		if let Some(cookie) = &self.cookie {
			transport = transport.with_cookies(cookie.clone(), &self.config.csrf_cookie);
		}
		Ok(Arc::new(
			StorefrontClient::new(transport, self.config.endpoints.clone())
				.with_login_path(&self.config.login_path)
				.with_page_path(page_path)
				.with_timeout(self.config.request_timeout()),
		))
	}

	fn cart_host(&self, view: Arc<TermCart>) -> CartHost {
		CartHost {
			view,
			notifier: Arc::new(TermNotifier),
			prompt: Arc::new(TermPrompt {
				assume_yes: self.assume_yes,
			}),
			navigator: Arc::new(TermNavigator),
		}
	}
}

/// Runs one command. Failures already reported to the user map to a failing
/// exit code rather than an error.
pub(crate) async fn run(cli: Cli, config: Config) -> anyhow::Result<ExitCode> {
	let session = Session {
		config,
		cookie: cli.cookie,
		assume_yes: cli.yes,
	};
	match cli.command {
		Command::Cart { action } => cart(&session, action).await,
		Command::Add { product, quantity } => add(&session, ProductId::new(product), &quantity).await,
		Command::Consent { action } => consent(&session, action),
		Command::Newsletter { email, unsubscribe } => newsletter(&session, email, unsubscribe).await,
		Command::Search { query } => search(&session, &query).await,
	}
}

async fn cart(session: &Session, action: CartAction) -> anyhow::Result<ExitCode> {
	let client = session.client(CART_PAGE)?;
	let outcome = match action {
		CartAction::Set {
			item,
			quantity,
			current,
			line_total,
		} => {
			let item = ItemId::new(item);
			let view = Arc::new(TermCart::with_line(item.clone(), current, line_total.unwrap_or(Money::ZERO), 0));
			sync(session, client, view).update_quantity(&item, &quantity).await?
		}
		CartAction::Remove { item, others } => {
			let item = ItemId::new(item);
			let view = Arc::new(TermCart::with_line(item.clone(), 1, Money::ZERO, others));
			sync(session, client, view).remove_from_cart(&item).await?
		}
		CartAction::Clear => sync(session, client, Arc::new(TermCart::default())).clear_cart().await?,
		CartAction::Shipping {
			method,
			cost,
			subtotal,
		} => {
			let view = Arc::new(TermCart::default().with_subtotal(subtotal));
			ShippingSelector::new(client, view).select(&method, cost).await?;
			Outcome::Applied
		}
	};
	Ok(exit_code(outcome))
}

fn sync(session: &Session, client: Client, view: Arc<TermCart>) -> CartSync<HttpTransport> {
	CartSync::new(client, session.cart_host(view))
		.with_shipping_fee(session.config.shipping_fee)
		.with_stale_policy(session.config.stale_responses)
}

async fn add(session: &Session, product: ProductId, quantity: &str) -> anyhow::Result<ExitCode> {
	let client = session.client(&format!("/products/{product}/"))?;
	let view = Arc::new(TermCart::for_product(session.cookie.is_some(), quantity));
	let flow = AddToCart::new(client, view, Arc::new(TermNotifier), Arc::new(TermNavigator));
	Ok(exit_code(flow.add(&product).await?))
}

fn consent(session: &Session, action: ConsentAction) -> anyhow::Result<ExitCode> {
	let Some(path) = session.config.storage_path.clone().or_else(FileStore::default_path) else {
		bail!("no storage path configured and no data directory available");
	};
	let store = FileStore::open(&path)?;
	let toggles = Arc::new(TermToggles::default());
	let mut controller = ConsentController::new(store, toggles.clone(), Arc::new(TermDialog));
	controller.load_on_startup();

	match action {
		ConsentAction::Toggle { category } => {
			controller.toggle(category);
			controller.save()?;
		}
		ConsentAction::AcceptAll => controller.accept_all()?,
		ConsentAction::RejectAll => controller.reject_all()?,
		ConsentAction::Save => controller.save()?,
		ConsentAction::Show => {}
	}

	let prefs = toggles.current();
	println!(
		"analytics: {}  marketing: {}  preference: {}",
		prefs.analytics, prefs.marketing, prefs.preference
	);
	if let Some(record) = controller.record() {
		println!("recorded {} (v{})", record.updated_at.to_rfc3339(), record.version);
	}
	Ok(ExitCode::SUCCESS)
}

async fn newsletter(session: &Session, email: String, unsubscribe: bool) -> anyhow::Result<ExitCode> {
	let client = session.client("/")?;
	let (newsletter, _disposer) = Newsletter::setup(client, Arc::new(TermNavigator));
	if unsubscribe {
		let message = newsletter.unsubscribe(&email).await?;
		println!("{message}");
		return Ok(ExitCode::SUCCESS);
	}
	let form: Arc<dyn NewsletterForm> = Arc::new(TermNewsletterForm { email });
	Ok(exit_code(newsletter.subscribe(&form).await))
}

async fn search(session: &Session, query: &str) -> anyhow::Result<ExitCode> {
	let client = session.client("/")?;
	let (autocomplete, _disposer) = Autocomplete::setup(client, Arc::new(TermSuggestions));
	match autocomplete.input(query).await {
		Lookup::TooShort => println!("type at least two characters"),
		Lookup::Empty => println!("no suggestions"),
		Lookup::Failed => return Ok(ExitCode::FAILURE),
		Lookup::Shown(_) | Lookup::Stale => {}
	}
	Ok(ExitCode::SUCCESS)
}

fn exit_code(outcome: Outcome) -> ExitCode {
	tracing::debug!(?outcome, "command finished");
	match outcome {
		Outcome::Failed(_) => ExitCode::FAILURE,
		_ => ExitCode::SUCCESS,
	}
}
