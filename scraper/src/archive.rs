use log::{debug, info, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::date::parse_flexible_date;
use crate::episode::{Episode, Image};
use crate::error::{ArchiveError, EntryWarning, ImageProblem};

pub const DEFAULT_ARCHIVE_URL: &str = "https://www.thisamericanlife.org/archive";

/// Outcome of one pass over the archive page.
#[derive(Debug, Default)]
pub struct Extraction {
    pub episodes: Vec<Episode>,
    pub warnings: Vec<EntryWarning>,
}

/// The archive listing page of the site.
pub struct Archive {
    source: Url,
    client: Client,
}

impl Archive {
    pub fn new(source: Url) -> Self {
        Self {
            source,
            client: Client::new(),
        }
    }

    pub fn parse(source: &str) -> Result<Self, ArchiveError> {
        let url = Url::parse(source).map_err(|e| ArchiveError::InvalidSource {
            url: source.to_string(),
            source: e,
        })?;
        Ok(Self::new(url))
    }

    pub fn source(&self) -> &Url {
        &self.source
    }

    pub fn fetch_html(&self) -> Result<String, ArchiveError> {
        debug!("GET {}", self.source);
        let response = self
            .client
            .get(self.source.clone())
            .send()
            .map_err(ArchiveError::Fetch)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ArchiveError::UpstreamStatus { status });
        }

        response.text().map_err(ArchiveError::Parse)
    }

    /// Fetches the page and extracts every entry, keeping the per-entry
    /// warnings alongside the episodes.
    pub fn extract(&self) -> Result<Extraction, ArchiveError> {
        let html = self.fetch_html()?;
        Ok(extract_episodes(&html, &self.source))
    }

    pub fn list(&self) -> Result<Vec<Episode>, ArchiveError> {
        self.extract().map(|extraction| extraction.episodes)
    }
}

struct Selectors {
    article: Selector,
    container: Selector,
    title_link: Selector,
    date: Selector,
    description: Selector,
    image: Selector,
}

impl Selectors {
    fn new() -> Self {
        let parse = |css: &str| Selector::parse(css).expect("static selector is valid");
        Self {
            article: parse("article.node"),
            container: parse("header > .container"),
            title_link: parse("h2 > a"),
            date: parse("span.date-display-single"),
            description: parse("div.content .field-item > p"),
            image: parse("header figure.episode-image > img"),
        }
    }
}

/// Walks the archive markup and builds an episode for every `article.node`
/// that carries a title and a link. Relative links are resolved against the
/// origin of `base`.
pub fn extract_episodes(html: &str, base: &Url) -> Extraction {
    let document = Html::parse_document(html);
    let selectors = Selectors::new();
    let origin = base.join("/").unwrap_or_else(|_| base.clone());

    let mut extraction = Extraction::default();
    for (position, article) in document.select(&selectors.article).enumerate() {
        match parse_article(article, position, &origin, &selectors, &mut extraction.warnings) {
            Ok(episode) => extraction.episodes.push(episode),
            Err(warning) => {
                warn!("{}", warning);
                extraction.warnings.push(warning);
            }
        }
    }

    info!(
        "Extracted {} episodes ({} warnings)",
        extraction.episodes.len(),
        extraction.warnings.len()
    );
    extraction
}

fn parse_article(
    article: ElementRef,
    position: usize,
    origin: &Url,
    selectors: &Selectors,
    warnings: &mut Vec<EntryWarning>,
) -> Result<Episode, EntryWarning> {
    let container = article.select(&selectors.container).next();
    if container.is_none() {
        debug!("no header container in article at position {}", position);
    }

    let link = container.and_then(|c| c.select(&selectors.title_link).next());
    let name = link.map(element_text).unwrap_or_default();
    if name.is_empty() {
        return Err(EntryWarning::MissingName { position });
    }

    let href = match link.and_then(|l| l.value().attr("href")) {
        Some(href) => href,
        None => return Err(EntryWarning::MissingHref { position, name }),
    };
    let page_url = match origin.join(href) {
        Ok(url) => url.to_string(),
        Err(_) => {
            return Err(EntryWarning::InvalidHref {
                position,
                name,
                href: href.to_string(),
            })
        }
    };

    // Older markup has no date node at all; that is not an error.
    let date = match container.and_then(|c| c.select(&selectors.date).next()) {
        Some(node) => match parse_flexible_date(&element_text(node)) {
            Ok(date) => Some(date),
            Err(source) => {
                return Err(EntryWarning::InvalidDate {
                    position,
                    name,
                    source,
                })
            }
        },
        None => {
            debug!("no date in article at position {} with name `{}`", position, name);
            None
        }
    };

    let description = article
        .select(&selectors.description)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    let image = match article.select(&selectors.image).next() {
        Some(img) => match parse_image(img) {
            Ok(image) => Some(image),
            Err(problem) => {
                let warning = EntryWarning::InvalidImage {
                    position,
                    name: name.clone(),
                    problem,
                };
                warn!("{}", warning);
                warnings.push(warning);
                None
            }
        },
        None => None,
    };

    Ok(Episode {
        name,
        description,
        date,
        page_url,
        audio_url: audio_url(article),
        image,
    })
}

fn parse_image(img: ElementRef) -> Result<Image, ImageProblem> {
    let element = img.value();

    let dimension = |attribute: &'static str| -> Result<u32, ImageProblem> {
        let value = element
            .attr(attribute)
            .ok_or(ImageProblem::MissingAttribute(attribute))?;
        let parsed = value
            .trim()
            .parse::<u32>()
            .map_err(|source| ImageProblem::InvalidDimension {
                attribute,
                value: value.to_string(),
                source,
            })?;
        if parsed == 0 {
            return Err(ImageProblem::ZeroDimension(attribute));
        }
        Ok(parsed)
    };

    Ok(Image {
        source: element.attr("src").unwrap_or_default().to_string(),
        width: dimension("width")?,
        height: dimension("height")?,
    })
}

/// The listing never links the audio asset; it lives on the episode page.
/// This is the single place to fill it in once that page is fetched.
fn audio_url(_article: ElementRef) -> Option<String> {
    None
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
