//! Column preset for employee records.

use crate::column::ColumnDef;

/// Columns of the employee picker: name search plus team, designation and
/// manager drop-downs.
pub fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("EMPLOYEE NAME", "name").text_filter(),
        ColumnDef::new("TEAM", "team_name").select_filter(),
        ColumnDef::new("DESIGNATION", "position").select_filter(),
        ColumnDef::new("MANAGER", "related_people.manager[0]").select_filter(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::validate_columns;

    #[test]
    fn test_preset_is_valid() {
        let columns = columns();
        assert!(validate_columns(&columns).is_ok());
        assert!(columns.iter().all(|c| c.accessor.is_valid()));
    }
}
