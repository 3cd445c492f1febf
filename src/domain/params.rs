//! Static description of the parameters accepted by the prediction endpoint

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Integer,
    Float,
}

impl FieldKind {
    /// Type name used in the Swagger document.
    pub fn swagger_type(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "number",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub help: &'static str,
}

pub const TICKET_CLASS: ParamSpec = ParamSpec {
    name: "ticket_class",
    kind: FieldKind::Integer,
    required: true,
    help: "Ticket class: 1 = 1st (Upper), 2 = 2nd (Middle), 3 = 3rd (Lower)",
};

pub const SEX: ParamSpec = ParamSpec {
    name: "sex",
    kind: FieldKind::Integer,
    required: true,
    help: "Sex: 0 = Man, 1 = Woman",
};

pub const AGE: ParamSpec = ParamSpec {
    name: "age",
    kind: FieldKind::Integer,
    required: true,
    help: "Age",
};

pub const NUM_OF_SIBLINGS_AND_SPOUSES: ParamSpec = ParamSpec {
    name: "num_of_siblings_and_spouses",
    kind: FieldKind::Integer,
    required: true,
    help: "Number of siblings and spouses",
};

pub const NUM_OF_PARENTS_AND_CHILDREN: ParamSpec = ParamSpec {
    name: "num_of_parents_and_children",
    kind: FieldKind::Integer,
    required: true,
    help: "Number of parents and children",
};

pub const FARE: ParamSpec = ParamSpec {
    name: "fare",
    kind: FieldKind::Float,
    required: true,
    help: "Fare",
};

pub const PORT_OF_EMBARKATION: ParamSpec = ParamSpec {
    name: "port_of_embarkation",
    kind: FieldKind::Integer,
    required: true,
    help: "Port of embarkation: 0 = Southampton, 1 = Cherbourg, 2 = Queenstown",
};

/// Every parameter of `POST /predict`, in declaration order.
pub const PREDICTION_PARAMS: [ParamSpec; 7] = [
    TICKET_CLASS,
    SEX,
    AGE,
    NUM_OF_SIBLINGS_AND_SPOUSES,
    NUM_OF_PARENTS_AND_CHILDREN,
    FARE,
    PORT_OF_EMBARKATION,
];
