// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Metaview.
//!
//! This module contains pure logic with no I/O. Fetching, rendering and UI
//! updates are handled via ports defined in the application layer.
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no network or filesystem access
//! - **Closed variants**: payload kinds and member kinds are enums, matched exhaustively
//! - **Immutable metamodel**: a `MetaClass` never changes after construction

pub mod diagram;
pub mod display;
pub mod error;
pub mod meta;
pub mod transfer;

pub use diagram::{DiagramBuilder, DiagramText};
pub use display::{DiagramDm, DisplayModel, ObjectDm, SystemDm};
pub use error::{DomainError, ErrorCategory};
pub use meta::{MetaAction, MetaClass, MetaPackage, MetaProperty};
pub use transfer::{
    Col, DomainObject, DomainType, DomainTypes, FieldSet, Layout, LayoutMember, Link, Member,
    MemberDescription, MemberKind, Menu, MenuEntry, ObjectMember, PayloadKind, ResultObject,
    ResultType, ResultValue, Row, ScalarValue, Section, ServiceAction, Tab, TabGroup,
    TransferObject, User, Version,
};
