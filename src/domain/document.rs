use serde::{Deserialize, Serialize};

/// Standard construction-accounting forms the tool can fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// КС-2, cost certificate of completed work
    Ks2,
    /// КС-3, acceptance act of completed work
    Ks3,
}

impl DocumentKind {
    pub fn all() -> [DocumentKind; 2] {
        [DocumentKind::Ks2, DocumentKind::Ks3]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Ks2 => "ks2",
            DocumentKind::Ks3 => "ks3",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "").as_str() {
            "ks2" | "кс2" => Some(DocumentKind::Ks2),
            "ks3" | "кс3" => Some(DocumentKind::Ks3),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DocumentKind::Ks2 => "КС-2",
            DocumentKind::Ks3 => "КС-3",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::Ks2 => "Справка о стоимости выполненных работ",
            DocumentKind::Ks3 => "Акт о приемке выполненных работ",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Free-text header fields of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeaderField {
    ObjectName,
    ContractNumber,
    Contractor,
    Customer,
    ReportingPeriod,
    Location,
    WorkDescription,
    DeclaredTotal,
}

impl HeaderField {
    pub fn all() -> [HeaderField; 8] {
        [
            HeaderField::ObjectName,
            HeaderField::ContractNumber,
            HeaderField::Contractor,
            HeaderField::Customer,
            HeaderField::ReportingPeriod,
            HeaderField::Location,
            HeaderField::WorkDescription,
            HeaderField::DeclaredTotal,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderField::ObjectName => "objectName",
            HeaderField::ContractNumber => "contractNumber",
            HeaderField::Contractor => "contractor",
            HeaderField::Customer => "customer",
            HeaderField::ReportingPeriod => "reportingPeriod",
            HeaderField::Location => "location",
            HeaderField::WorkDescription => "workDescription",
            HeaderField::DeclaredTotal => "declaredTotal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().replace('_', "").to_lowercase().as_str() {
            "objectname" => Some(HeaderField::ObjectName),
            "contractnumber" => Some(HeaderField::ContractNumber),
            "contractor" => Some(HeaderField::Contractor),
            "customer" => Some(HeaderField::Customer),
            "reportingperiod" => Some(HeaderField::ReportingPeriod),
            "location" => Some(HeaderField::Location),
            "workdescription" => Some(HeaderField::WorkDescription),
            "declaredtotal" => Some(HeaderField::DeclaredTotal),
            _ => None,
        }
    }

    /// Label printed on the form.
    pub fn label(&self) -> &'static str {
        match self {
            HeaderField::ObjectName => "Наименование объекта",
            HeaderField::ContractNumber => "Номер договора",
            HeaderField::Contractor => "Подрядчик",
            HeaderField::Customer => "Заказчик",
            HeaderField::ReportingPeriod => "Отчетный период",
            HeaderField::Location => "Место выполнения работ",
            HeaderField::WorkDescription => "Описание выполненных работ",
            HeaderField::DeclaredTotal => "Общая стоимость (руб.)",
        }
    }
}

/// Contract and parties block at the top of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentHeader {
    pub object_name: String,
    pub contract_number: String,
    pub contractor: String,
    pub customer: String,
    pub reporting_period: String,
    pub location: String,
    pub work_description: String,
    /// Total typed by hand; kept as text and never mixed into computed totals
    pub declared_total: String,
}

impl DocumentHeader {
    pub fn get(&self, field: HeaderField) -> &str {
        match field {
            HeaderField::ObjectName => &self.object_name,
            HeaderField::ContractNumber => &self.contract_number,
            HeaderField::Contractor => &self.contractor,
            HeaderField::Customer => &self.customer,
            HeaderField::ReportingPeriod => &self.reporting_period,
            HeaderField::Location => &self.location,
            HeaderField::WorkDescription => &self.work_description,
            HeaderField::DeclaredTotal => &self.declared_total,
        }
    }

    pub fn set(&mut self, field: HeaderField, value: impl Into<String>) {
        let value = value.into();
        match field {
            HeaderField::ObjectName => self.object_name = value,
            HeaderField::ContractNumber => self.contract_number = value,
            HeaderField::Contractor => self.contractor = value,
            HeaderField::Customer => self.customer = value,
            HeaderField::ReportingPeriod => self.reporting_period = value,
            HeaderField::Location => self.location = value,
            HeaderField::WorkDescription => self.work_description = value,
            HeaderField::DeclaredTotal => self.declared_total = value,
        }
    }
}
