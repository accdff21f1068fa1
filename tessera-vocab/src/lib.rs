//! RDF Vocabulary Constants and Local Namespaces for Tessera
//!
//! This crate provides a centralized location for the vocabulary IRIs the
//! normalization pipeline and the consolidation jobs work with, plus the
//! local URN namespaces under which Tessera mints its own identifiers.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `owl` - OWL vocabulary (http://www.w3.org/2002/07/owl#)
//! - `dc` / `dcterms` - Dublin Core
//! - `skos` - SKOS vocabulary
//! - `sdo` - schema.org
//! - `local` - the Tessera URN namespaces and role types

/// RDF vocabulary constants
pub mod rdf {
    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

    /// rdfs:comment IRI
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
}

/// OWL vocabulary constants
pub mod owl {
    /// owl:sameAs IRI
    pub const SAME_AS: &str = "http://www.w3.org/2002/07/owl#sameAs";
}

/// XSD vocabulary constants
pub mod xsd {
    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
}

/// Dublin Core Elements vocabulary constants
pub mod dc {
    /// dc:identifier IRI
    pub const IDENTIFIER: &str = "http://purl.org/dc/elements/1.1/identifier";
}

/// Dublin Core Terms vocabulary constants
pub mod dcterms {
    /// dcterms:identifier IRI
    pub const IDENTIFIER: &str = "http://purl.org/dc/terms/identifier";
}

/// SKOS vocabulary constants
pub mod skos {
    /// skos:prefLabel IRI
    pub const PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";

    /// skos:Concept IRI
    pub const CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";
}

/// schema.org vocabulary constants
pub mod sdo {
    /// sdo:identifier IRI
    pub const IDENTIFIER: &str = "https://schema.org/identifier";

    /// sdo:termCode IRI
    pub const TERM_CODE: &str = "https://schema.org/termCode";

    /// sdo:name IRI
    pub const NAME: &str = "https://schema.org/name";

    /// sdo:url IRI
    pub const URL: &str = "https://schema.org/url";

    /// sdo:DefinedTerm IRI
    pub const DEFINED_TERM: &str = "https://schema.org/DefinedTerm";

    /// sdo:CategoryCode IRI
    pub const CATEGORY_CODE: &str = "https://schema.org/CategoryCode";
}

/// Local URN namespaces and role types
///
/// Everything Tessera mints lives under the `urn:tessera:` prefix. The
/// sub-namespace prefixes double as routing keys for the per-tenant store
/// resolution handled outside this core.
pub mod local {
    /// Common URN prefix for all locally minted identifiers
    pub const URN_PREFIX: &str = "urn:tessera:";

    /// Namespace for entity identifiers
    pub const ENTITIES: &str = "urn:tessera:e:";

    /// Namespace for classifier identifiers
    pub const CLASSIFIERS: &str = "urn:tessera:c:";

    /// Namespace for transaction identifiers
    pub const TRANSACTIONS: &str = "urn:tessera:t:";

    /// Provenance predicate linking a minted identifier to the identifier
    /// it replaced
    pub const SOURCE_IDENTIFIER: &str = "urn:tessera:srcid";

    /// Role type for fragments with independent identity
    pub const TYPE_INDIVIDUAL: &str = "urn:tessera:e:Individual";

    /// Role type for fragments used to categorize individuals
    pub const TYPE_CLASSIFIER: &str = "urn:tessera:e:Classifier";

    /// Role type for sub-structures without independent identity
    pub const TYPE_EMBEDDED: &str = "urn:tessera:e:Embedded";
}

/// The characteristic properties which signal that a fragment has
/// independent identity, in the priority order used for skolemization
/// (first present wins).
pub const CHARACTERISTIC_PROPERTIES: [&str; 6] = [
    rdfs::LABEL,
    dc::IDENTIFIER,
    dcterms::IDENTIFIER,
    skos::PREF_LABEL,
    sdo::IDENTIFIER,
    sdo::TERM_CODE,
];

/// The subset of characteristic properties consulted during role
/// classification. Order is irrelevant here, only membership.
pub const CLASSIFICATION_PROPERTIES: [&str; 5] = [
    dc::IDENTIFIER,
    dcterms::IDENTIFIER,
    rdfs::LABEL,
    skos::PREF_LABEL,
    sdo::IDENTIFIER,
];

/// Types whose instances are classifiers rather than individuals.
pub const CLASSIFIER_TYPES: [&str; 3] = [sdo::DEFINED_TERM, skos::CONCEPT, sdo::CATEGORY_CODE];

/// Properties checked by the duplicate detection job. Two fragments sharing
/// a type and the value of one of these properties are merge candidates.
pub const DUPLICATE_DETECTION_PROPERTIES: [&str; 9] = [
    rdfs::LABEL,
    owl::SAME_AS,
    sdo::IDENTIFIER,
    sdo::TERM_CODE,
    sdo::NAME,
    sdo::URL,
    skos::PREF_LABEL,
    dcterms::IDENTIFIER,
    dc::IDENTIFIER,
];
