// Dutch province mapping
// The source dataset carries no province column for NL records, so the
// normalizer derives it from the city name via this fixed table.

/// All twelve Dutch provinces. Province rollups always cover the full set,
/// even when a province has no companies in the dataset.
pub const ALL_PROVINCES: [&str; 12] = [
    "North Holland",
    "South Holland",
    "Utrecht",
    "North Brabant",
    "Gelderland",
    "Overijssel",
    "Limburg",
    "Groningen",
    "Friesland",
    "Flevoland",
    "Drenthe",
    "Zeeland",
];

/// City name → province. Exact match after trimming; unmapped cities fall
/// outside the province rollup.
const CITY_PROVINCE: &[(&str, &str)] = &[
    // North Holland
    ("Amsterdam", "North Holland"),
    ("Haarlem", "North Holland"),
    ("Hilversum", "North Holland"),
    ("Amstelveen", "North Holland"),
    ("Alkmaar", "North Holland"),
    ("Hoofddorp", "North Holland"),
    ("Schiphol", "North Holland"),
    ("Naarden", "North Holland"),
    ("Bussum", "North Holland"),
    ("Zaandam", "North Holland"),
    ("Zaanstad", "North Holland"),
    ("Huizen", "North Holland"),
    ("Purmerend", "North Holland"),
    ("Laren", "North Holland"),
    ("Heerhogowaard", "North Holland"),
    ("Weesp", "North Holland"),
    ("Zaandijk", "North Holland"),
    ("Castricum", "North Holland"),
    ("Schagen", "North Holland"),
    ("Halfweg", "North Holland"),
    ("De Goorn", "North Holland"),
    ("Hoorn", "North Holland"),
    // South Holland
    ("Rotterdam", "South Holland"),
    ("The Hague", "South Holland"),
    ("Den Haag", "South Holland"),
    ("Delft", "South Holland"),
    ("Leiden", "South Holland"),
    ("Dordrecht", "South Holland"),
    ("Zoetermeer", "South Holland"),
    ("Schiedam", "South Holland"),
    ("Rijswijk", "South Holland"),
    ("Noordwijk", "South Holland"),
    ("Oegstgeest", "South Holland"),
    ("Gouda", "South Holland"),
    ("Westland", "South Holland"),
    ("Alphen aan den Rijn", "South Holland"),
    ("Capelle aan den IJssel", "South Holland"),
    ("Voorburg", "South Holland"),
    ("Katwijk", "South Holland"),
    ("Naaldwijk", "South Holland"),
    ("Wassenaar", "South Holland"),
    ("Bodegraven", "South Holland"),
    ("Gorinchem", "South Holland"),
    ("Boskoop", "South Holland"),
    // Utrecht
    ("Utrecht", "Utrecht"),
    ("Amersfoort", "Utrecht"),
    ("Zeist", "Utrecht"),
    ("Nieuwegein", "Utrecht"),
    ("Veenendaal", "Utrecht"),
    ("Woerden", "Utrecht"),
    ("Soest", "Utrecht"),
    ("Houten", "Utrecht"),
    ("Maarssen", "Utrecht"),
    ("Breukelen", "Utrecht"),
    ("Vleuten", "Utrecht"),
    ("Bunnik", "Utrecht"),
    ("Bilthoven", "Utrecht"),
    ("De Bilt", "Utrecht"),
    ("Baarn", "Utrecht"),
    ("Rhenen", "Utrecht"),
    // North Brabant
    ("Eindhoven", "North Brabant"),
    ("Tilburg", "North Brabant"),
    ("Breda", "North Brabant"),
    ("Den Bosch", "North Brabant"),
    ("'s-Hertogenbosch", "North Brabant"),
    ("Helmond", "North Brabant"),
    ("Roosendaal", "North Brabant"),
    ("Oss", "North Brabant"),
    ("Bergen op Zoom", "North Brabant"),
    ("Oosterhout", "North Brabant"),
    ("Waalwijk", "North Brabant"),
    ("Veldhoven", "North Brabant"),
    ("Best", "North Brabant"),
    ("Boxmeer", "North Brabant"),
    ("Veghel", "North Brabant"),
    // Gelderland
    ("Nijmegen", "Gelderland"),
    ("Arnhem", "Gelderland"),
    ("Apeldoorn", "Gelderland"),
    ("Ede", "Gelderland"),
    ("Wageningen", "Gelderland"),
    ("Doetinchem", "Gelderland"),
    ("Zutphen", "Gelderland"),
    ("Tiel", "Gelderland"),
    ("Harderwijk", "Gelderland"),
    ("Wijchen", "Gelderland"),
    ("Barneveld", "Gelderland"),
    ("Culemborg", "Gelderland"),
    ("Nijkerk", "Gelderland"),
    ("Hoevelaken", "Gelderland"),
    ("Geldermalsen", "Gelderland"),
    // Overijssel
    ("Enschede", "Overijssel"),
    ("Zwolle", "Overijssel"),
    ("Deventer", "Overijssel"),
    ("Hengelo", "Overijssel"),
    ("Almelo", "Overijssel"),
    ("Kampen", "Overijssel"),
    ("Oldenzaal", "Overijssel"),
    // Limburg
    ("Maastricht", "Limburg"),
    ("Venlo", "Limburg"),
    ("Heerlen", "Limburg"),
    ("Sittard", "Limburg"),
    ("Geleen", "Limburg"),
    ("Roermond", "Limburg"),
    ("Weert", "Limburg"),
    // Groningen
    ("Groningen", "Groningen"),
    ("Haren", "Groningen"),
    ("Veendam", "Groningen"),
    // Friesland
    ("Leeuwarden", "Friesland"),
    ("Drachten", "Friesland"),
    ("Sneek", "Friesland"),
    ("Heerenveen", "Friesland"),
    ("Joure", "Friesland"),
    ("Huins", "Friesland"),
    // Flevoland
    ("Almere", "Flevoland"),
    ("Lelystad", "Flevoland"),
    ("Dronten", "Flevoland"),
    ("Zeewolde", "Flevoland"),
    // Drenthe
    ("Assen", "Drenthe"),
    ("Emmen", "Drenthe"),
    ("Hoogeveen", "Drenthe"),
    ("Meppel", "Drenthe"),
    // Zeeland
    ("Middelburg", "Zeeland"),
    ("Vlissingen", "Zeeland"),
    ("Goes", "Zeeland"),
    ("Terneuzen", "Zeeland"),
];

/// Look up the province for a Dutch city name.
pub fn province_for_city(city: &str) -> Option<&'static str> {
    let clean = city.trim();
    CITY_PROVINCE
        .iter()
        .find(|(name, _)| *name == clean)
        .map(|(_, province)| *province)
}
