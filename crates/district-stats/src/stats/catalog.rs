use serde::Serialize;

/// States the service ships district coverage for.
pub const SUPPORTED_STATES: [&str; 6] = [
    "GUJARAT",
    "MAHARASHTRA",
    "RAJASTHAN",
    "UTTAR PRADESH",
    "MADHYA PRADESH",
    "BIHAR",
];

/// A district and its approximate administrative-centre coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistrictLocation {
    #[serde(rename = "name")]
    pub district_name: &'static str,
    #[serde(rename = "state")]
    pub state_name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

const fn location(
    state_name: &'static str,
    district_name: &'static str,
    latitude: f64,
    longitude: f64,
) -> DistrictLocation {
    DistrictLocation {
        district_name,
        state_name,
        latitude,
        longitude,
    }
}

/// Every known district, grouped by state in [`SUPPORTED_STATES`] order.
pub static DISTRICT_LOCATIONS: &[DistrictLocation] = &[
    location("GUJARAT", "AHMEDABAD", 23.0225, 72.5714),
    location("GUJARAT", "SURAT", 21.1702, 72.8311),
    location("GUJARAT", "VADODARA", 22.3072, 73.1812),
    location("GUJARAT", "RAJKOT", 22.3039, 70.8022),
    location("GUJARAT", "GANDHINAGAR", 23.2156, 72.6369),
    location("GUJARAT", "BHAVNAGAR", 21.7645, 72.1519),
    location("GUJARAT", "JAMNAGAR", 22.4707, 70.0577),
    location("GUJARAT", "JUNAGADH", 21.5222, 70.4579),
    location("GUJARAT", "BHARUCH", 21.7051, 72.9959),
    location("GUJARAT", "NAVSARI", 20.9467, 72.9528),
    location("GUJARAT", "SURENDRANAGAR", 22.7236, 71.6554),
    location("GUJARAT", "MEHSANA", 23.6000, 72.3910),
    location("GUJARAT", "PORBANDAR", 21.6417, 69.6099),
    location("GUJARAT", "AMRELI", 21.6264, 71.2223),
    location("GUJARAT", "NARMADA", 21.8700, 73.4000),
    location("GUJARAT", "KUTCH", 23.0739, 69.8597),
    location("GUJARAT", "PANCHMAHAL", 22.7500, 73.5000),
    location("GUJARAT", "BANASKANTHA", 24.2360, 72.4150),
    location("GUJARAT", "ANAND", 22.5520, 72.9510),
    location("MAHARASHTRA", "MUMBAI", 19.0760, 72.8777),
    location("MAHARASHTRA", "PUNE", 18.5204, 73.8567),
    location("MAHARASHTRA", "NAGPUR", 21.1458, 79.0882),
    location("MAHARASHTRA", "THANE", 19.2183, 72.9781),
    location("MAHARASHTRA", "NASHIK", 19.9975, 73.7898),
    location("MAHARASHTRA", "AURANGABAD", 19.8762, 75.3433),
    location("MAHARASHTRA", "SOLAPUR", 17.6599, 75.9064),
    location("MAHARASHTRA", "AMRAVATI", 20.9374, 77.7796),
    location("MAHARASHTRA", "KOLHAPUR", 16.7050, 74.2433),
    location("MAHARASHTRA", "SANGLI", 16.8524, 74.5815),
    location("MAHARASHTRA", "JALGAON", 21.0077, 75.5626),
    location("MAHARASHTRA", "AHMEDNAGAR", 19.0948, 74.7480),
    location("MAHARASHTRA", "LATUR", 18.4088, 76.5604),
    location("MAHARASHTRA", "DHULE", 20.9042, 74.7749),
    location("MAHARASHTRA", "RATNAGIRI", 16.9902, 73.3120),
    location("MAHARASHTRA", "SATARA", 17.6805, 74.0183),
    location("MAHARASHTRA", "NANDED", 19.1383, 77.3210),
    location("MAHARASHTRA", "BEED", 18.9894, 75.7607),
    location("MAHARASHTRA", "JALNA", 19.8347, 75.8800),
    location("MAHARASHTRA", "OSMANABAD", 18.1770, 76.0398),
    location("RAJASTHAN", "JAIPUR", 26.9124, 75.7873),
    location("RAJASTHAN", "JODHPUR", 26.2389, 73.0243),
    location("RAJASTHAN", "UDAIPUR", 24.5854, 73.7125),
    location("RAJASTHAN", "KOTA", 25.2138, 75.8648),
    location("RAJASTHAN", "AJMER", 26.4499, 74.6399),
    location("RAJASTHAN", "BIKANER", 28.0229, 73.3119),
    location("RAJASTHAN", "ALWAR", 27.5530, 76.6346),
    location("RAJASTHAN", "BHILWARA", 25.3407, 74.6313),
    location("RAJASTHAN", "BARMER", 25.7521, 71.3967),
    location("RAJASTHAN", "SIKAR", 27.6094, 75.1399),
    location("RAJASTHAN", "NAGAUR", 27.2020, 73.7339),
    location("RAJASTHAN", "CHURU", 28.2925, 74.9535),
    location("UTTAR PRADESH", "LUCKNOW", 26.8467, 80.9462),
    location("UTTAR PRADESH", "KANPUR NAGAR", 26.4499, 80.3319),
    location("UTTAR PRADESH", "VARANASI", 25.3176, 82.9739),
    location("UTTAR PRADESH", "PRAYAGRAJ", 25.4358, 81.8463),
    location("UTTAR PRADESH", "AGRA", 27.1767, 78.0081),
    location("UTTAR PRADESH", "GORAKHPUR", 26.7606, 83.3732),
    location("UTTAR PRADESH", "BAREILLY", 28.3670, 79.4304),
    location("UTTAR PRADESH", "MEERUT", 28.9845, 77.7064),
    location("UTTAR PRADESH", "ALIGARH", 27.8974, 78.0880),
    location("UTTAR PRADESH", "JHANSI", 25.4484, 78.5685),
    location("UTTAR PRADESH", "AZAMGARH", 26.0739, 83.1859),
    location("UTTAR PRADESH", "SITAPUR", 27.5680, 80.6790),
    location("MADHYA PRADESH", "BHOPAL", 23.2599, 77.4126),
    location("MADHYA PRADESH", "INDORE", 22.7196, 75.8577),
    location("MADHYA PRADESH", "JABALPUR", 23.1815, 79.9864),
    location("MADHYA PRADESH", "GWALIOR", 26.2183, 78.1828),
    location("MADHYA PRADESH", "UJJAIN", 23.1765, 75.7885),
    location("MADHYA PRADESH", "SAGAR", 23.8388, 78.7378),
    location("MADHYA PRADESH", "REWA", 24.5362, 81.3037),
    location("MADHYA PRADESH", "SATNA", 24.6005, 80.8322),
    location("MADHYA PRADESH", "CHHINDWARA", 22.0574, 78.9382),
    location("MADHYA PRADESH", "KHARGONE", 21.8234, 75.6150),
    location("MADHYA PRADESH", "BETUL", 21.9016, 77.8960),
    location("MADHYA PRADESH", "MANDLA", 22.5980, 80.3714),
    location("BIHAR", "PATNA", 25.5941, 85.1376),
    location("BIHAR", "GAYA", 24.7914, 85.0002),
    location("BIHAR", "BHAGALPUR", 25.2425, 86.9842),
    location("BIHAR", "MUZAFFARPUR", 26.1209, 85.3647),
    location("BIHAR", "DARBHANGA", 26.1542, 85.8918),
    location("BIHAR", "PURNIA", 25.7771, 87.4753),
    location("BIHAR", "NALANDA", 25.1350, 85.4430),
    location("BIHAR", "SARAN", 25.7800, 84.7300),
    location("BIHAR", "SIWAN", 26.2200, 84.3600),
    location("BIHAR", "BEGUSARAI", 25.4182, 86.1272),
    location("BIHAR", "ROHTAS", 24.9500, 84.0300),
    location("BIHAR", "KATIHAR", 25.5390, 87.5780),
];

pub fn is_supported_state(state_name: &str) -> bool {
    SUPPORTED_STATES.contains(&state_name)
}

/// District names of a state in catalog order; empty for unsupported states.
pub fn districts_of(state_name: &str) -> Vec<&'static str> {
    DISTRICT_LOCATIONS
        .iter()
        .filter(|location| location.state_name == state_name)
        .map(|location| location.district_name)
        .collect()
}
