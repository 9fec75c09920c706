use super::tag::wire_enum;

wire_enum! {
    /// Display format of a number property.
    #[derive(Default)]
    pub enum NumberFormat (fallback = Unsupported) {
        #[default]
        Number => "number",
        NumberWithCommas => "number_with_commas",
        Percent => "percent",
        Dollar => "dollar",
        AustralianDollar => "australian_dollar",
        CanadianDollar => "canadian_dollar",
        SingaporeDollar => "singapore_dollar",
        Euro => "euro",
        Pound => "pound",
        Yen => "yen",
        Ruble => "ruble",
        Rupee => "rupee",
        Won => "won",
        Yuan => "yuan",
        Real => "real",
        Lira => "lira",
        Rupiah => "rupiah",
        Franc => "franc",
        HongKongDollar => "hong_kong_dollar",
        NewZealandDollar => "new_zealand_dollar",
        Krona => "krona",
        NorwegianKrone => "norwegian_krone",
        MexicanPeso => "mexican_peso",
        Rand => "rand",
        NewTaiwanDollar => "new_taiwan_dollar",
        DanishKrone => "danish_krone",
        Zloty => "zloty",
        Baht => "baht",
        Forint => "forint",
        Koruna => "koruna",
        Shekel => "shekel",
        ChileanPeso => "chilean_peso",
        PhilippinePeso => "philippine_peso",
        Dirham => "dirham",
        ColombianPeso => "colombian_peso",
        Riyal => "riyal",
        Ringgit => "ringgit",
        Leu => "leu",
        ArgentinePeso => "argentine_peso",
        UruguayanPeso => "uruguayan_peso",
        PeruvianSol => "peruvian_sol",
        Unsupported => "unsupported",
    }
}

wire_enum! {
    /// Aggregation a rollup property applies to the related values.
    pub enum RollupFunction (fallback = Unsupported) {
        Count => "count",
        CountValues => "count_values",
        Empty => "empty",
        NotEmpty => "not_empty",
        Unique => "unique",
        ShowUnique => "show_unique",
        PercentEmpty => "percent_empty",
        PercentNotEmpty => "percent_not_empty",
        Sum => "sum",
        Average => "average",
        Median => "median",
        Min => "min",
        Max => "max",
        Range => "range",
        EarliestDate => "earliest_date",
        LatestDate => "latest_date",
        DateRange => "date_range",
        Checked => "checked",
        Unchecked => "unchecked",
        PercentChecked => "percent_checked",
        PercentUnchecked => "percent_unchecked",
        CountPerGroup => "count_per_group",
        PercentPerGroup => "percent_per_group",
        ShowOriginal => "show_original",
        Unsupported => "unsupported",
    }
}
