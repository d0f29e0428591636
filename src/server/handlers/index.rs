//! Help page handler.

use axum::http::header;
use axum::response::IntoResponse;

const INDEX_TEXT: &str = r#"
expire.sh checks your domain and certificate expirations

Construct a calendar URL by providing a list of host names separated by commas.
For example, to monitor example.com, example.org and example.net subscribe to:

    https://expire.sh/example.com,example.org,example.net

Formats
-------

Responses are available as text, JSON or iCal. Pick one with the Accept header
('text/plain', 'application/json' or 'text/calendar'):

    $ curl -H "Accept: application/json" https://expire.sh/example.com
    {"expirations":[{"Name":"example.com","CertificateExpires":"2020-12-02T12:00:00Z","CertificateError":null,"Domain":"example.com","DomainExpires":"2019-08-13T04:00:00Z","DomainError":null}]}

or put the format at the front of the path:

    $ curl https://expire.sh/ical/example.com
    BEGIN:VCALENDAR
    ...
    END:VCALENDAR

Status codes
------------

Text and JSON responses report problems through the status code. '502 Bad
Gateway' means at least one certificate or domain could not be checked. '417
Expectation Failed' means at least one expires soon (default: within 30 days,
see the ttl parameter).

iCal responses are always '200 OK' so calendar programs keep working.

Parameters
----------

"ttl" changes what "soon" means. Units: ns, us, ms, s, m, h, d, w, y.

    $ curl https://expire.sh/text/example.com?ttl=1y

"quiet" drops every host whose certificate and domain are fine, which is handy
from cron:

    $ curl "https://expire.sh/text/example.com?ttl=60d&quiet"
"#;

/// Serves the plain-text help page at `/`.
pub async fn index_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], INDEX_TEXT)
}
