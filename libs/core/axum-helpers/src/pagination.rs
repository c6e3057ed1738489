//! Pagination query parameters in, `Link` and `X-Total-Count` headers out.

use std::str::FromStr;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderName, HeaderValue, Uri, header, request::Parts},
};
use database::{Page, PageRequest, PaginationError, Sort};

use crate::errors::AppError;

pub const X_TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

/// `page`, `size` and repeatable `sort` query parameters.
///
/// Other parameters are ignored so filters can share the query string.
#[derive(Debug, Clone)]
pub struct Pageable<F>(pub PageRequest<F>);

impl<F, S> FromRequestParts<S> for Pageable<F>
where
    F: FromStr + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parse_page_request(parts.uri.query())
            .map(Pageable)
            .map_err(|e| AppError::InvalidQuery(e.to_string()))
    }
}

pub fn parse_page_request<F: FromStr>(query: Option<&str>) -> Result<PageRequest<F>, PaginationError> {
    let defaults = PageRequest::<F>::default();
    let mut page = defaults.page();
    let mut size = defaults.size();
    let mut sorts = Vec::new();

    for (key, value) in query_pairs(query.unwrap_or_default()) {
        match key.as_str() {
            "page" => page = parse_number("page", value)?,
            "size" => size = parse_number("size", value)?,
            "sort" if !value.is_empty() => sorts.push(Sort::parse(&value)?),
            _ => {}
        }
    }

    Ok(sorts
        .into_iter()
        .fold(PageRequest::new(page, size)?, PageRequest::with_sort))
}

fn parse_number(key: &'static str, value: String) -> Result<u64, PaginationError> {
    value
        .parse()
        .map_err(|_| PaginationError::InvalidParameter { key, value })
}

/// Decoded `key=value` pairs; `+` is a space.
fn query_pairs(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    query.split('&').filter(|pair| !pair.is_empty()).map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (decode(key), decode(value))
    })
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}

/// `X-Total-Count` and RFC 5988 `Link` headers for `page`.
///
/// Links keep every query parameter of `uri` except `page` and `size`, which
/// are appended for each target page.
pub fn pagination_headers<T>(uri: &Uri, page: &Page<T>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(X_TOTAL_COUNT, HeaderValue::from(page.total_elements()));

    let size = page.size();
    let total_pages = page.total_pages();
    let base = base_uri(uri);

    let mut links = Vec::with_capacity(4);
    if page.has_next() {
        links.push(link(&base, page.page() + 1, size, "next"));
    }
    if page.has_previous() {
        links.push(link(&base, page.page() - 1, size, "prev"));
    }
    links.push(link(&base, total_pages.saturating_sub(1), size, "last"));
    links.push(link(&base, 0, size, "first"));

    if let Ok(value) = HeaderValue::from_str(&links.join(",")) {
        headers.insert(header::LINK, value);
    }
    headers
}

/// Path plus retained query, ready for `page`/`size` to be appended.
fn base_uri(uri: &Uri) -> String {
    let retained: Vec<&str> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or_default();
            !pair.is_empty() && key != "page" && key != "size"
        })
        .collect();

    let mut base = format!("{}?", uri.path());
    for pair in retained {
        base.push_str(pair);
        base.push('&');
    }
    base
}

fn link(base: &str, page: u64, size: u64, rel: &str) -> String {
    let target = format!("{base}page={page}&size={size}")
        .replace(',', "%2C")
        .replace(';', "%3B");
    format!("<{target}>; rel=\"{rel}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::SortDirection;
    use strum::EnumString;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
    #[strum(serialize_all = "lowercase")]
    enum Column {
        Id,
        Title,
    }

    #[test]
    fn test_defaults_without_query() {
        let request = parse_page_request::<Column>(None).unwrap();
        assert_eq!((request.page(), request.size()), (0, 20));
        assert!(request.sort().is_empty());
    }

    #[test]
    fn test_parses_page_size_and_sorts_in_order() {
        let request =
            parse_page_request::<Column>(Some("title.contains=x&page=2&size=5&sort=title%2Cdesc&sort=id")).unwrap();

        assert_eq!((request.page(), request.size()), (2, 5));
        assert_eq!(request.sort()[0].field, Column::Title);
        assert_eq!(request.sort()[0].direction, SortDirection::Desc);
        assert_eq!(request.sort()[1], Sort::asc(Column::Id));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            parse_page_request::<Column>(Some("page=-1")).unwrap_err(),
            PaginationError::InvalidParameter {
                key: "page",
                value: "-1".to_string()
            }
        );
        assert!(matches!(
            parse_page_request::<Column>(Some("size=0")),
            Err(PaginationError::InvalidSize { .. })
        ));
        assert!(matches!(
            parse_page_request::<Column>(Some("sort=owner,asc")),
            Err(PaginationError::InvalidSort(_))
        ));
    }

    #[test]
    fn test_empty_sort_is_ignored() {
        let request = parse_page_request::<Column>(Some("sort=")).unwrap();
        assert!(request.sort().is_empty());
    }

    #[test]
    fn test_headers_for_middle_page() {
        let uri: Uri = "/api/processes?title.contains=a&page=1&size=10".parse().unwrap();
        let request = PageRequest::<Column>::new(1, 10).unwrap();
        let page = Page::new(vec![(); 10], &request, 35);

        let headers = pagination_headers(&uri, &page);

        assert_eq!(headers[X_TOTAL_COUNT], "35");
        assert_eq!(
            headers[header::LINK],
            "</api/processes?title.contains=a&page=2&size=10>; rel=\"next\",\
             </api/processes?title.contains=a&page=0&size=10>; rel=\"prev\",\
             </api/processes?title.contains=a&page=3&size=10>; rel=\"last\",\
             </api/processes?title.contains=a&page=0&size=10>; rel=\"first\""
        );
    }

    #[test]
    fn test_headers_for_empty_result() {
        let uri: Uri = "/api/processes".parse().unwrap();
        let page: Page<()> = Page::new(vec![], &PageRequest::<Column>::default(), 0);

        let headers = pagination_headers(&uri, &page);

        assert_eq!(headers[X_TOTAL_COUNT], "0");
        assert_eq!(
            headers[header::LINK],
            "</api/processes?page=0&size=20>; rel=\"last\",</api/processes?page=0&size=20>; rel=\"first\""
        );
    }

    #[test]
    fn test_link_escapes_commas() {
        let uri: Uri = "/api/processes?id.in=1,2&sort=id,desc".parse().unwrap();
        let page: Page<()> = Page::new(vec![], &PageRequest::<Column>::default(), 0);

        let link = pagination_headers(&uri, &page)[header::LINK].to_str().unwrap().to_string();

        assert!(link.starts_with("</api/processes?id.in=1%2C2&sort=id%2Cdesc&page=0&size=20>"));
    }
}
