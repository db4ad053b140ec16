//! Page rendering.
//!
//! [`render`] is a pure function from catalog and cart state to a [`Page`]:
//! one display-ready structure per surface the view has, `None` for the
//! surfaces it does not. HTML comes from askama templates over a `Page`.

use std::str::FromStr;

use askama::Template;

use crate::cart::{Cart, CartLine};
use crate::catalog::{Catalog, Product};
use crate::config::StorefrontConfig;
use crate::notice::{Level, Notice};

/// Pages of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Products,
    Cart,
    Contact,
}

/// Named insertion points a view may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    FeaturedProducts,
    ProductsGrid,
    CartItems,
    CartTotal,
    CartCount,
}

impl View {
    pub const ALL: [Self; 4] = [Self::Home, Self::Products, Self::Cart, Self::Contact];

    /// Surfaces present on this view. Every view has the cart count badge.
    #[must_use]
    pub const fn surfaces(&self) -> &'static [Surface] {
        match self {
            Self::Home => &[Surface::FeaturedProducts, Surface::CartCount],
            Self::Products => &[Surface::ProductsGrid, Surface::CartCount],
            Self::Cart => &[Surface::CartItems, Surface::CartTotal, Surface::CartCount],
            Self::Contact => &[Surface::CartCount],
        }
    }

    #[must_use]
    pub fn has(&self, surface: Surface) -> bool {
        self.surfaces().contains(&surface)
    }

    /// Page file name, used for links and navigation.
    #[must_use]
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Home => "index.html",
            Self::Products => "products.html",
            Self::Cart => "cart.html",
            Self::Contact => "contact.html",
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Products => "products",
            Self::Cart => "cart",
            Self::Contact => "contact",
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|view| view.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown view '{s}' (expected home, products, cart or contact)"))
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// View Models
// =============================================================================

/// Product card in the featured section or grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
}

impl ProductCardView {
    fn new(product: &Product, config: &StorefrontConfig) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            image_url: config.image_url(&product.image),
        }
    }
}

/// One cart line for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: i32,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_price: String,
    pub image_url: String,
}

impl CartItemView {
    fn new(line: &CartLine, config: &StorefrontConfig) -> Self {
        Self {
            id: line.id.as_i32(),
            name: line.name.clone(),
            unit_price: line.unit_price().display(),
            quantity: line.quantity,
            line_price: line.line_price().display(),
            image_url: config.image_url(&line.image),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    fn new(cart: &Cart, config: &StorefrontConfig) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| CartItemView::new(line, config))
                .collect(),
            subtotal: cart.total_price().display(),
            item_count: cart.total_item_count(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A notice ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub message: &'static str,
    /// `"toast"` or `"alert"`, used as a CSS class.
    pub kind: &'static str,
    /// Milliseconds before a toast is dismissed, 0 for alerts.
    pub dismiss_after_ms: u128,
}

impl From<Notice> for NoticeView {
    fn from(notice: Notice) -> Self {
        Self {
            message: notice.message(),
            kind: match notice.level() {
                Level::Info => "toast",
                Level::Alert => "alert",
            },
            dismiss_after_ms: notice.duration().map_or(0, |d| d.as_millis()),
        }
    }
}

/// Everything displayed on one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub view: View,
    pub featured: Option<Vec<ProductCardView>>,
    pub products: Option<Vec<ProductCardView>>,
    pub cart: Option<CartView>,
    /// Cart total without currency symbol (e.g., `"99.98"`).
    pub cart_total: Option<String>,
    pub cart_count: Option<u64>,
    pub notice: Option<NoticeView>,
}

/// Render `view` from the current catalog and cart.
#[must_use]
pub fn render(view: View, catalog: &Catalog, cart: &Cart, config: &StorefrontConfig) -> Page {
    let cards = |products: &[Product]| {
        products
            .iter()
            .map(|product| ProductCardView::new(product, config))
            .collect::<Vec<_>>()
    };

    Page {
        view,
        featured: view
            .has(Surface::FeaturedProducts)
            .then(|| cards(catalog.featured(config.featured_count))),
        products: view
            .has(Surface::ProductsGrid)
            .then(|| cards(catalog.products())),
        cart: view
            .has(Surface::CartItems)
            .then(|| CartView::new(cart, config)),
        cart_total: view
            .has(Surface::CartTotal)
            .then(|| cart.total_price().amount_string()),
        cart_count: view
            .has(Surface::CartCount)
            .then(|| cart.total_item_count()),
        notice: None,
    }
}

impl Page {
    /// Attach a notice to show on this page.
    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(NoticeView::from(notice));
        self
    }

    /// Render the full page as HTML.
    ///
    /// # Errors
    ///
    /// Returns `askama::Error` if template rendering fails.
    pub fn to_html(&self) -> askama::Result<String> {
        let base = BaseContext::new(self);
        match self.view {
            View::Home => HomeTemplate {
                base,
                featured: self.featured.as_deref().unwrap_or_default(),
            }
            .render(),
            View::Products => ProductsTemplate {
                base,
                products: self.products.as_deref().unwrap_or_default(),
            }
            .render(),
            View::Cart => CartShowTemplate {
                base,
                cart: self.cart.as_ref(),
                total: self.cart_total.as_deref().unwrap_or("0.00"),
            }
            .render(),
            View::Contact => ContactTemplate { base }.render(),
        }
    }

    /// Render only the cart item list fragment, if this view has one.
    ///
    /// # Errors
    ///
    /// Returns `askama::Error` if template rendering fails.
    pub fn cart_items_html(&self) -> askama::Result<Option<String>> {
        self.cart
            .as_ref()
            .map(|cart| CartItemsTemplate { cart }.render())
            .transpose()
    }

    /// Render only the cart count badge fragment.
    ///
    /// # Errors
    ///
    /// Returns `askama::Error` if template rendering fails.
    pub fn cart_count_html(&self) -> askama::Result<Option<String>> {
        self.cart_count
            .map(|count| CartCountTemplate { count }.render())
            .transpose()
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Fields shared by every page through `base.html`.
struct BaseContext<'a> {
    view: View,
    cart_count: u64,
    notice: Option<&'a NoticeView>,
}

impl<'a> BaseContext<'a> {
    fn new(page: &'a Page) -> Self {
        Self {
            view: page.view,
            cart_count: page.cart_count.unwrap_or_default(),
            notice: page.notice.as_ref(),
        }
    }

    fn is_current(&self, name: &str) -> bool {
        self.view.name() == name
    }
}

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate<'a> {
    base: BaseContext<'a>,
    featured: &'a [ProductCardView],
}

/// Product grid template.
#[derive(Template)]
#[template(path = "products.html")]
struct ProductsTemplate<'a> {
    base: BaseContext<'a>,
    products: &'a [ProductCardView],
}

/// Cart page template.
#[derive(Template)]
#[template(path = "cart/show.html")]
struct CartShowTemplate<'a> {
    base: BaseContext<'a>,
    cart: Option<&'a CartView>,
    total: &'a str,
}

/// Contact page template.
#[derive(Template)]
#[template(path = "contact.html")]
struct ContactTemplate<'a> {
    base: BaseContext<'a>,
}

/// Cart items fragment template.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
struct CartItemsTemplate<'a> {
    cart: &'a CartView,
}

/// Cart count badge fragment template.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
struct CartCountTemplate {
    count: u64,
}
