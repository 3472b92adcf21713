use chrono::{DateTime, Duration, TimeZone, Utc};
use engine_runtime::{FilterError, apply};
use expression_engine::Mapper;
use model::{Filterable, Member, Value, ValueType};
use uuid::Uuid;

/// Model used by every end-to-end scenario. `child_class` makes the type
/// self-referencing, which exercises bounded nested expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct TestClass {
    pub id: i64,
    pub name: String,
    pub child_class: Option<Box<TestClass>>,
    pub my_guid: Uuid,
    pub my_date_time: Option<DateTime<Utc>>,
}

impl TestClass {
    pub fn new(id: i64, name: &str, child_class: Option<TestClass>) -> Self {
        TestClass {
            id,
            name: name.to_string(),
            child_class: child_class.map(Box::new),
            my_guid: Uuid::nil(),
            my_date_time: None,
        }
    }

    pub fn with_guid(mut self, guid: Uuid) -> Self {
        self.my_guid = guid;
        self
    }

    pub fn with_date_time(mut self, at: DateTime<Utc>) -> Self {
        self.my_date_time = Some(at);
        self
    }
}

impl Filterable for TestClass {
    fn members() -> Vec<Member<Self>> {
        vec![
            Member::field("Id", |t: &TestClass| Value::from(t.id), ValueType::Int),
            Member::field(
                "Name",
                |t: &TestClass| Value::from(t.name.as_str()),
                ValueType::String,
            ),
            Member::field("MyGuid", |t: &TestClass| Value::from(t.my_guid), ValueType::Uuid),
            Member::field(
                "MyDateTime",
                |t: &TestClass| Value::from(t.my_date_time),
                ValueType::Timestamp,
            ),
            Member::nested("ChildClass", |t: &TestClass| t.child_class.as_deref()),
        ]
    }
}

pub const ROSE_GUID: &str = "e2cec5dd-208d-4bb5-a852-50008f8ba366";
pub const HAMID_GUID: &str = "de12bae1-93fa-40e4-92d1-2e60f95b468c";

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid base time"))
}

fn guid(text: &str) -> Uuid {
    Uuid::parse_str(text).unwrap_or_else(|e| panic!("invalid guid {text}: {e}"))
}

/// The 25-record data set, including names that need escaping and a
/// duplicated id.
pub fn sample_data() -> Vec<TestClass> {
    let mut lst: Vec<TestClass> = Vec::new();
    lst.push(
        TestClass::new(1, "John", None)
            .with_guid(Uuid::from_u128(1))
            .with_date_time(base_time()),
    );
    lst.push(
        TestClass::new(2, "Bob", None)
            .with_guid(Uuid::from_u128(2))
            .with_date_time(base_time()),
    );
    lst.push(
        TestClass::new(3, "Jack", Some(lst[0].clone()))
            .with_date_time(base_time() + Duration::days(2)),
    );
    lst.push(TestClass::new(4, "Rose", None).with_guid(guid(ROSE_GUID)));
    lst.push(TestClass::new(5, "Ali", None));
    lst.push(TestClass::new(6, "Hamid", Some(lst[0].clone())).with_guid(guid(HAMID_GUID)));
    lst.push(TestClass::new(7, "Hasan", Some(lst[1].clone())));
    lst.push(TestClass::new(8, "Farhad", Some(lst[2].clone())));
    lst.push(TestClass::new(9, "Sara", None));
    lst.push(TestClass::new(10, "Jorge", None));
    lst.push(TestClass::new(11, "joe", None));
    lst.push(TestClass::new(12, "jimmy", Some(lst[0].clone())));
    lst.push(TestClass::new(13, "Nazanin", None));
    lst.push(TestClass::new(14, "Reza", None));
    lst.push(TestClass::new(15, "Korosh", Some(lst[0].clone())));
    lst.push(TestClass::new(16, "Kamran", Some(lst[1].clone())));
    lst.push(TestClass::new(17, "Saeid", Some(lst[2].clone())));
    lst.push(TestClass::new(18, "jessi==ca", None));
    lst.push(TestClass::new(19, "Ped=ram", None));
    lst.push(TestClass::new(20, "Peyman!", None));
    lst.push(TestClass::new(21, "Fereshte", None));
    lst.push(TestClass::new(22, "LIAM", None));
    lst.push(TestClass::new(22, r"\Liam", None));
    lst.push(TestClass::new(23, "LI | AM", None));
    lst.push(TestClass::new(24, "(LI,AM)", None));
    lst
}

pub fn mapper() -> Mapper<TestClass> {
    Mapper::generated()
}

/// Applies `filter` to the sample data with the default mapper.
pub fn run_filter(filter: &str) -> Result<Vec<TestClass>, FilterError> {
    apply(sample_data(), filter, &mapper())
}

/// Names of the matching records, panicking on any filter error.
pub fn filter_names(filter: &str) -> Vec<String> {
    run_filter(filter)
        .unwrap_or_else(|e| panic!("filter `{filter}` failed: {e}"))
        .into_iter()
        .map(|t| t.name)
        .collect()
}

/// Ids of the matching records, panicking on any filter error.
pub fn filter_ids(filter: &str) -> Vec<i64> {
    run_filter(filter)
        .unwrap_or_else(|e| panic!("filter `{filter}` failed: {e}"))
        .into_iter()
        .map(|t| t.id)
        .collect()
}

/// Error raised by `filter`, panicking if it compiles.
pub fn filter_error(filter: &str) -> FilterError {
    match run_filter(filter) {
        Ok(rows) => panic!("filter `{filter}` unexpectedly matched {} rows", rows.len()),
        Err(err) => err,
    }
}
