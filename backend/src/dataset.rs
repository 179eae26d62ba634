//! Embedded sample dataset shown on the transform demo.

use crate::models::RawRecord;

/// The ten demo records, in display order.
pub fn sample_records() -> Vec<RawRecord> {
    vec![
        RawRecord::new("Stepha", "squiddinton0", "481", "Female", "07.10.1996")
            .with_last_name("Quiddinton"),
        RawRecord::new("Niki", "nbenedick1", "578", "Female", "24.09.1996")
            .with_last_name("Benedick"),
        RawRecord::new("Kenneth", "kbeavers2", "463", "Male", "18.10.1990"),
        RawRecord::new("Nissy", "njuggins3", "436", "Female", "09.01.2000")
            .with_last_name("Juggins"),
        RawRecord::new("Jaymee", "jdotterill4", "687", "Female", "13.02.2000")
            .with_last_name("Dotterill"),
        RawRecord::new("Shell", "sshawe5", "631", "Female", "08.06.1999")
            .with_last_name("Shawe"),
        RawRecord::new("Ham", "hruslinge6", "659", "Male", "01.03.1991"),
        RawRecord::new("Gabriell", "glukins7", "500", "Female", "25.11.1998")
            .with_last_name("Lukins"),
        RawRecord::new("Roddy", "rwhates8", "609", "Male", "06.03.1993")
            .with_last_name("Whates"),
        RawRecord::new("Iris", "ibolens9", "418", "Female", "13.04.1993"),
    ]
}
