//! Operation shape extraction
//!
//! Decides which parameter and return types of an operation carry payload
//! and flattens them into the request and response shapes.

use super::flatten::FieldFlattener;
use super::types::{FieldMap, OperationShape};
use crate::config::InfrastructureMarkers;
use crate::descriptor::{OperationDescriptor, TypeDescriptor};

/// Result of extracting one operation, with candidate counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// The selected shapes
    pub shape: OperationShape,
    /// Parameters that flattened to a non-empty field map
    pub request_candidates: usize,
    /// Returns that flattened to a non-empty field map
    pub response_candidates: usize,
}

impl Extraction {
    /// Whether more than one populated composite competed for a side
    pub fn is_ambiguous(&self) -> bool {
        self.request_candidates > 1 || self.response_candidates > 1
    }
}

/// Which end of the signature a type sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Param,
    Return,
}

/// Classifies an operation's types and flattens the payload ones
#[derive(Debug, Clone, Default)]
pub struct OperationShapeExtractor {
    flattener: FieldFlattener,
    markers: InfrastructureMarkers,
}

impl OperationShapeExtractor {
    /// Create an extractor
    pub fn new(flattener: FieldFlattener, markers: InfrastructureMarkers) -> Self {
        Self { flattener, markers }
    }

    /// Extract the request/response shapes of an operation
    pub fn extract(&self, op: &OperationDescriptor) -> OperationShape {
        self.extract_detailed(op).shape
    }

    /// Extract shapes and report how many candidates each side had
    pub fn extract_detailed(&self, op: &OperationDescriptor) -> Extraction {
        let (request, request_candidates) = self.select(&op.params, Side::Param);
        let (response, response_candidates) = self.select(&op.returns, Side::Return);

        Extraction {
            shape: OperationShape { request, response },
            request_candidates,
            response_candidates,
        }
    }

    /// Whether a type carries no payload on the given side.
    ///
    /// An explicit role tag is authoritative; untagged types are matched
    /// against the display-name markers.
    fn is_infrastructure(&self, ty: &TypeDescriptor, side: Side) -> bool {
        if !ty.role.is_unspecified() {
            return ty.role.is_infrastructure();
        }

        let display = ty.display_name();
        match side {
            Side::Param => self.markers.matches_param(&display),
            Side::Return => self.markers.matches_return(&display),
        }
    }

    /// Walk one side of the signature.
    ///
    /// A populated field map replaces the current candidate (last one wins).
    /// An empty one only fills a side that has nothing yet.
    fn select(&self, types: &[TypeDescriptor], side: Side) -> (Option<FieldMap>, usize) {
        let mut selected: Option<FieldMap> = None;
        let mut populated = 0;

        for ty in types {
            if self.is_infrastructure(ty, side) {
                continue;
            }
            let Some(composite) = ty.composite_target() else {
                continue;
            };

            let fields = self.flattener.flatten(composite);
            if fields.is_empty() {
                if selected.is_none() {
                    selected = Some(fields);
                }
            } else {
                populated += 1;
                selected = Some(fields);
            }
        }

        (selected, populated)
    }
}
