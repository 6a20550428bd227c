// Block parser for `netsh interface ipv6 show route verbose` output
//
// Each route is printed as a block of `label: value` lines, and blocks are
// separated by two blank lines:
//
//   Destination Prefix: ::/0
//   Source Prefix: ::/0
//   Interface Index: 12
//   Gateway/Interface Name: fe80::1
//   Publish: No
//   Type: Manual
//   Metric: 256
//   SitePrefixLength  0
//   ValidLifeTime  infinite
//   PreferredLifeTime  infinite
//
//

use std::path::Path;

use super::classify::classify;
use super::source::{LineSource, ReaderLines};
use super::{RouteRecord, parse_integer, parse_prefix, parse_publish};
use crate::error::{AppError, AppResult, FieldError};

/// The labels netsh prints for each route, keyed exactly as the classifier returns them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    DestinationPrefix,
    SourcePrefix,
    InterfaceIndex,
    InterfaceName,
    Publish,
    Type,
    Metric,
    SitePrefixLength,
    ValidLifetime,
    PreferredLifetime,
}

impl Label {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "Destination Prefix:" => Some(Label::DestinationPrefix),
            "Source Prefix:" => Some(Label::SourcePrefix),
            "Interface Index:" => Some(Label::InterfaceIndex),
            "Gateway/Interface Name:" => Some(Label::InterfaceName),
            "Publish:" => Some(Label::Publish),
            "Type:" => Some(Label::Type),
            "Metric:" => Some(Label::Metric),
            "SitePrefixLength" => Some(Label::SitePrefixLength),
            "ValidLifeTime" => Some(Label::ValidLifetime),
            "PreferredLifeTime" => Some(Label::PreferredLifetime),
            _ => None,
        }
    }

    fn key(self) -> &'static str {
        match self {
            Label::DestinationPrefix => "Destination Prefix:",
            Label::SourcePrefix => "Source Prefix:",
            Label::InterfaceIndex => "Interface Index:",
            Label::InterfaceName => "Gateway/Interface Name:",
            Label::Publish => "Publish:",
            Label::Type => "Type:",
            Label::Metric => "Metric:",
            Label::SitePrefixLength => "SitePrefixLength",
            Label::ValidLifetime => "ValidLifeTime",
            Label::PreferredLifetime => "PreferredLifeTime",
        }
    }

    fn apply(self, route: &mut RouteRecord, value: &str) -> Result<(), FieldError> {
        match self {
            Label::DestinationPrefix => route.destination_prefix = Some(parse_prefix(value)?),
            Label::SourcePrefix => route.source_prefix = Some(value.to_string()),
            Label::InterfaceIndex => route.interface_index = Some(parse_integer(value)?),
            Label::InterfaceName => route.interface_name = Some(value.to_string()),
            Label::Publish => route.publish = Some(parse_publish(value)?),
            Label::Type => route.route_type = Some(value.to_string()),
            Label::Metric => route.metric = Some(parse_integer(value)?),
            Label::SitePrefixLength => route.site_prefix_length = Some(parse_integer(value)?),
            Label::ValidLifetime => route.valid_lifetime = Some(value.to_string()),
            Label::PreferredLifetime => route.preferred_lifetime = Some(value.to_string()),
        }
        Ok(())
    }
}

/// Incremental parser state. Feed it lines in order, then call [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct RouteBlockParser {
    routes: Vec<RouteRecord>,
    current: RouteRecord,
    has_data: bool,
    blank_lines: usize,
    line_number: usize,
}

impl RouteBlockParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: &str) -> AppResult<()> {
        self.line_number += 1;

        if line.trim().is_empty() {
            self.blank_lines += 1;
            // Only the second blank closes a block; further blanks are not counted again
            if self.blank_lines == 2 {
                self.flush();
            }
        } else {
            self.blank_lines = 0;
        }

        let Some((key, value)) = classify(line) else {
            return Ok(());
        };

        match Label::from_key(key) {
            Some(label) => {
                label
                    .apply(&mut self.current, value)
                    .map_err(|source| AppError::RouteParse {
                        line: self.line_number,
                        label: label.key(),
                        source,
                    })?;
                self.has_data = true;
            }
            None => {
                tracing::trace!(line = self.line_number, label = key, "Ignoring unknown label");
            }
        }

        Ok(())
    }

    /// Close the stream. A trailing block is kept only if it picked up at least one field.
    pub fn finish(mut self) -> Vec<RouteRecord> {
        if self.has_data {
            self.flush();
        }
        self.routes
    }

    fn flush(&mut self) {
        let route = std::mem::take(&mut self.current);
        let (address, prefix_len) = route
            .destination_prefix
            .as_ref()
            .map(|prefix| (prefix.address(), prefix.prefix_len()))
            .unzip();
        tracing::debug!(
            line = self.line_number,
            ?address,
            ?prefix_len,
            route = %route,
            "Finished route block"
        );
        self.routes.push(route);
        self.has_data = false;
    }
}

/// Parse every route from a line source, failing on the first bad value
pub fn parse_routes<S: LineSource + ?Sized>(source: &mut S) -> AppResult<Vec<RouteRecord>> {
    let mut parser = RouteBlockParser::new();
    while let Some(line) = source.next_line()? {
        parser.feed(&line)?;
    }
    Ok(parser.finish())
}

/// Parse a saved capture of the netsh output
pub fn parse_file(path: &Path) -> AppResult<Vec<RouteRecord>> {
    tracing::info!("Parsing route capture from {}", path.display());
    let mut lines = ReaderLines::open(path)?;
    parse_routes(&mut lines)
}
