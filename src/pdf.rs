use crate::error::Result;

// US Letter (inches)
pub const LETTER_WIDTH_IN: f64 = 8.5;
pub const LETTER_HEIGHT_IN: f64 = 11.0;

/// Page setup handed to the rendering backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    pub paper_width_in: f64,
    pub paper_height_in: f64,
    pub margin_in: f64,
    pub print_background: bool,
}

impl PdfOptions {
    pub fn letter() -> Self {
        Self {
            paper_width_in: LETTER_WIDTH_IN,
            paper_height_in: LETTER_HEIGHT_IN,
            margin_in: 0.0,
            print_background: true,
        }
    }
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self::letter()
    }
}

/// Anything that can turn a complete HTML document into PDF bytes.
pub trait PdfRenderer {
    fn render(&self, html: &str, options: &PdfOptions) -> Result<Vec<u8>>;
}

#[cfg(feature = "chrome")]
pub use chrome::ChromeRenderer;

/// Stand-in used when the crate is built without a browser backend.
#[cfg(not(feature = "chrome"))]
#[derive(Debug, Default)]
pub struct UnavailableRenderer;

#[cfg(not(feature = "chrome"))]
impl PdfRenderer for UnavailableRenderer {
    fn render(&self, _html: &str, _options: &PdfOptions) -> Result<Vec<u8>> {
        Err(crate::error::EstimateError::Render(
            "built without the `chrome` feature; no PDF backend available".to_string(),
        ))
    }
}

pub fn default_renderer() -> Box<dyn PdfRenderer> {
    #[cfg(feature = "chrome")]
    {
        Box::new(ChromeRenderer::new())
    }
    #[cfg(not(feature = "chrome"))]
    {
        Box::new(UnavailableRenderer)
    }
}

#[cfg(feature = "chrome")]
mod chrome {
    use std::io::Write;

    use colored::Colorize;
    use headless_chrome::types::PrintToPdfOptions;
    use headless_chrome::{Browser, LaunchOptions};
    use tracing::debug;
    use url::Url;

    use super::{PdfOptions, PdfRenderer};
    use crate::error::{EstimateError, Result};

    fn render_err(e: impl std::fmt::Display) -> EstimateError {
        EstimateError::Render(format!("{e:#}"))
    }

    /// Headless Chrome backend. One browser is launched per render and is
    /// dropped (which kills the process) before `render` returns, on every path.
    #[derive(Debug, Default)]
    pub struct ChromeRenderer;

    impl ChromeRenderer {
        pub fn new() -> Self {
            Self
        }

        fn print(browser: &Browser, page_url: &str, options: &PdfOptions) -> Result<Vec<u8>> {
            let tab = browser.new_tab().map_err(render_err)?;
            println!("{}", "Setting page content...".dimmed());
            tab.navigate_to(page_url).map_err(render_err)?;
            tab.wait_until_navigated().map_err(render_err)?;

            println!("{}", "Generating PDF...".dimmed());
            let pdf_options = PrintToPdfOptions {
                print_background: Some(options.print_background),
                paper_width: Some(options.paper_width_in),
                paper_height: Some(options.paper_height_in),
                margin_top: Some(options.margin_in),
                margin_bottom: Some(options.margin_in),
                margin_left: Some(options.margin_in),
                margin_right: Some(options.margin_in),
                ..Default::default()
            };
            tab.print_to_pdf(Some(pdf_options)).map_err(render_err)
        }
    }

    impl PdfRenderer for ChromeRenderer {
        fn render(&self, html: &str, options: &PdfOptions) -> Result<Vec<u8>> {
            let mut page = tempfile::Builder::new()
                .prefix("rooflink-")
                .suffix(".html")
                .tempfile()?;
            page.write_all(html.as_bytes())?;
            page.flush()?;
            let page_url = Url::from_file_path(page.path())
                .map_err(|_| render_err("failed to convert page path to URL"))?
                .to_string();
            debug!(url = %page_url, "staged page");

            println!("{}", "Launching browser...".dimmed());
            let launch = LaunchOptions::default_builder()
                .headless(true)
                .sandbox(false)
                .build()
                .map_err(render_err)?;
            let browser = Browser::new(launch).map_err(render_err)?;

            let result = Self::print(&browser, &page_url, options);
            drop(browser);
            println!("{}", "Browser closed".dimmed());
            result
        }
    }
}
