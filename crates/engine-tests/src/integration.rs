#[cfg(test)]
mod tests {
    use crate::utils::{
        HAMID_GUID, ROSE_GUID, filter_error, filter_ids, filter_names, mapper, sample_data,
    };
    use engine_runtime::{FilterErrorKind, FilterIteratorExt, is_valid};
    use tracing_test::traced_test;

    // Scenario: contains-match on a text member.
    // Expected Outcome: every name holding a lowercase `a`, in source order.
    #[traced_test]
    #[test]
    fn tc01() {
        let names = filter_names("Name=*a");

        assert!(names.contains(&"Jack".to_string()));
        assert!(names.contains(&"Sara".to_string()));
        assert!(!names.contains(&"Bob".to_string()));
        assert!(!names.contains(&"Ali".to_string()));
        assert_eq!(
            names,
            vec![
                "Jack", "Hamid", "Hasan", "Farhad", "Sara", "Nazanin", "Reza", "Kamran", "Saeid",
                "jessi==ca", "Ped=ram", "Peyman!", r"\Liam",
            ]
        );
    }

    // Scenario: ordering on an integer member.
    // Expected Outcome: ids 6..=24, including both records sharing id 22.
    #[traced_test]
    #[test]
    fn tc02() {
        let ids = filter_ids("Id>5");
        assert_eq!(ids.len(), 20);
        assert!(ids.iter().all(|id| *id > 5));
        assert_eq!(ids.iter().filter(|id| **id == 22).count(), 2);
    }

    // Scenario: `==` is case-sensitive, `=` folds case on text members.
    // Expected Outcome: only the loose operator finds `Ali` from `ali`.
    #[traced_test]
    #[test]
    fn tc03() {
        assert_eq!(filter_names("Name==Ali"), vec!["Ali"]);
        assert!(filter_names("Name==ali").is_empty());
        assert_eq!(filter_names("Name=ali"), vec!["Ali"]);
        assert_eq!(filter_names("Name=liam"), vec!["LIAM"]);
    }

    // Scenario: values holding structural characters, escaped with `\`.
    // Expected Outcome: each filter finds exactly the record with that literal name.
    #[traced_test]
    #[test]
    fn tc04() {
        assert_eq!(filter_names(r"Name==Ped\=ram"), vec!["Ped=ram"]);
        assert_eq!(filter_names(r"Name==jessi\=\=ca"), vec!["jessi==ca"]);
        assert_eq!(filter_names(r"Name==Peyman\!"), vec!["Peyman!"]);
        assert_eq!(filter_names(r"Name==\\Liam"), vec![r"\Liam"]);
        assert_eq!(filter_names(r"Name==LI \| AM"), vec!["LI | AM"]);
        assert_eq!(filter_names(r"Name==\(LI,AM\)"), vec!["(LI,AM)"]);
    }

    // Scenario: nested member access through ChildClass.
    // Expected Outcome: parents of John and Jack; a missing child reads as null.
    #[traced_test]
    #[test]
    fn tc05() {
        assert_eq!(filter_ids("ChildClass.Name==John"), vec![3, 6, 12, 15]);
        assert_eq!(filter_ids("ChildClass.Name==Jack"), vec![8, 17]);
        assert_eq!(filter_ids("ChildClass.Name!=null").len(), 8);
        assert_eq!(filter_ids("ChildClass.Name==null").len(), 17);
        assert_eq!(filter_ids("ChildClass.Id>1"), vec![7, 8, 16, 17]);
    }

    // Scenario: unique identifier equality.
    // Expected Outcome: explicit guids match their record; the nil guid matches the rest.
    #[traced_test]
    #[test]
    fn tc06() {
        assert_eq!(filter_names(&format!("MyGuid=={ROSE_GUID}")), vec!["Rose"]);
        assert_eq!(
            filter_names(&format!("MyGuid=={}", HAMID_GUID.to_uppercase())),
            vec!["Hamid"]
        );
        assert_eq!(
            filter_ids("MyGuid==00000000-0000-0000-0000-000000000000").len(),
            21
        );
    }

    // Scenario: timestamp ordering and null tests.
    // Expected Outcome: natural date ordering; records without a timestamp are null.
    #[traced_test]
    #[test]
    fn tc07() {
        assert_eq!(filter_ids("MyDateTime>2024-01-02"), vec![3]);
        assert_eq!(filter_ids("MyDateTime>=2024-01-01"), vec![1, 2, 3]);
        assert_eq!(filter_ids("MyDateTime<2024-01-02 00:00:00"), vec![1, 2]);
        assert_eq!(filter_ids("MyDateTime==2024-01-01T12:00:00Z"), vec![1, 2]);
        assert_eq!(filter_ids("MyDateTime==null").len(), 22);
    }

    // Scenario: grouping changes the outcome for a record where A=false and C=true.
    // Expected Outcome: `&` binds tighter than `|`; Sara is only kept when `|` is outermost.
    #[traced_test]
    #[test]
    fn tc08() {
        let plain = filter_names("Name^*J&Id>1|Name==Sara");
        let left = filter_names("(Name^*J&Id>1)|Name==Sara");
        let right = filter_names("Name^*J&(Id>1|Name==Sara)");

        assert_eq!(plain, vec!["Jack", "Sara", "Jorge"]);
        assert_eq!(plain, left);
        assert_eq!(right, vec!["Jack", "Jorge"]);
    }

    // Scenario: disjunction, conjunction and negated text operators.
    // Expected Outcome: counts consistent with the data set.
    #[traced_test]
    #[test]
    fn tc09() {
        assert_eq!(filter_names("Name==Bob|Name==Sara"), vec!["Bob", "Sara"]);
        assert_eq!(filter_names("Id>=22&Id<=22"), vec!["LIAM", r"\Liam"]);
        assert_eq!(filter_names("Name*$a"), vec!["Sara", "Reza", "jessi==ca"]);
        assert_eq!(filter_ids("Name!*a").len(), 12);
        assert_eq!(filter_ids("Name!^J").len(), 22);
        assert_eq!(filter_ids("Name!$a").len(), 22);
        assert_eq!(filter_ids("Name^*J(Id>5)"), vec![10]);
    }

    // Scenario: invalid filters.
    // Expected Outcome: each failure is reported with its own kind; nothing is dropped silently.
    #[traced_test]
    #[test]
    fn tc10() {
        assert_eq!(filter_error("Ghost==1").kind(), FilterErrorKind::Mapping);
        assert_eq!(filter_error("Id==abc").kind(), FilterErrorKind::ValueCoercion);
        assert_eq!(filter_error("Name>").kind(), FilterErrorKind::Syntax);
        assert_eq!(filter_error("(Name==a").kind(), FilterErrorKind::Syntax);
        assert_eq!(filter_error("Name==a|").kind(), FilterErrorKind::Syntax);
        assert_eq!(filter_error("Id=*1").kind(), FilterErrorKind::UnsupportedOperator);
        assert_eq!(
            filter_error("MyGuid>abc").kind(),
            FilterErrorKind::UnsupportedOperator
        );
        assert_eq!(
            filter_error("ChildClass.ChildClass.Id==1").kind(),
            FilterErrorKind::Mapping
        );
    }

    // Scenario: syntax errors carry the offending position.
    // Expected Outcome: the message names the line and column.
    #[traced_test]
    #[test]
    fn tc11() {
        let err = filter_error("Name==a&&Id>1");
        assert_eq!(err.kind(), FilterErrorKind::Syntax);
        assert!(err.to_string().contains("line 1"), "{err}");
    }

    // Scenario: lazy filtering over borrowed records.
    // Expected Outcome: same matches as eager application, without consuming the source.
    #[traced_test]
    #[test]
    fn tc12() {
        let data = sample_data();
        let lazy: Vec<i64> = data
            .iter()
            .apply_filtering("Name=*a&Id<10", &mapper())
            .unwrap()
            .map(|t| t.id)
            .collect();

        assert_eq!(lazy, filter_ids("Name=*a&Id<10"));
        assert_eq!(lazy, vec![3, 6, 7, 8, 9]);
        assert_eq!(data.len(), 25);
    }

    // Scenario: validation without applying.
    // Expected Outcome: valid filters pass; rejections are logged with their reason.
    #[traced_test]
    #[test]
    fn tc13() {
        let mapper = mapper();
        assert!(is_valid("Name=*a|ChildClass.Name==John", &mapper));
        assert!(!is_valid("Ghost==1", &mapper));
        assert!(logs_contain("Unknown field: Ghost"));
    }
}
