//! schema.org LocalBusiness subtypes offered for a location
//!
//! [`FOOD_TYPES`] is shared by the wizard (which only asks food questions
//! for these types) and by the schema builder (which only emits cuisine,
//! reservations and menu for these types).

/// Type used when a location has no business type set
pub const DEFAULT_BUSINESS_TYPE: &str = "LocalBusiness";

/// Food-related business types
pub const FOOD_TYPES: &[&str] = &[
    "Restaurant",
    "FoodEstablishment",
    "Bakery",
    "BarOrPub",
    "Brewery",
    "CafeOrCoffeeShop",
    "Distillery",
    "FastFoodRestaurant",
    "IceCreamShop",
    "Winery",
];

/// A group of business types with display labels
#[derive(Debug, Clone, Copy)]
pub struct TypeGroup {
    pub label: &'static str,
    pub types: &'static [(&'static str, &'static str)],
}

/// Grouped catalog of business types and their human labels
pub const CATALOG: &[TypeGroup] = &[
    TypeGroup {
        label: "General",
        types: &[("LocalBusiness", "Local Business (General)")],
    },
    TypeGroup {
        label: "Automotive",
        types: &[
            ("AutomotiveBusiness", "Automotive Business (General)"),
            ("AutoBodyShop", "Auto Body Shop"),
            ("AutoDealer", "Auto Dealer"),
            ("AutoPartsStore", "Auto Parts Store"),
            ("AutoRental", "Auto Rental"),
            ("AutoRepair", "Auto Repair"),
            ("AutoWash", "Auto Wash"),
            ("GasStation", "Gas Station"),
            ("MotorcycleDealer", "Motorcycle Dealer"),
            ("MotorcycleRepair", "Motorcycle Repair"),
        ],
    },
    TypeGroup {
        label: "Education & Childcare",
        types: &[("ChildCare", "Child Care")],
    },
    TypeGroup {
        label: "Emergency Services",
        types: &[
            ("EmergencyService", "Emergency Service (General)"),
            ("FireStation", "Fire Station"),
            ("Hospital", "Hospital"),
            ("PoliceStation", "Police Station"),
        ],
    },
    TypeGroup {
        label: "Entertainment & Arts",
        types: &[
            ("EntertainmentBusiness", "Entertainment Business (General)"),
            ("AdultEntertainment", "Adult Entertainment"),
            ("AmusementPark", "Amusement Park"),
            ("ArtGallery", "Art Gallery"),
            ("Casino", "Casino"),
            ("ComedyClub", "Comedy Club"),
            ("MovieTheater", "Movie Theater"),
            ("NightClub", "Night Club"),
            ("PerformingArtsTheater", "Performing Arts Theater"),
        ],
    },
    TypeGroup {
        label: "Financial Services",
        types: &[
            ("FinancialService", "Financial Service (General)"),
            ("AccountingService", "Accounting Service"),
            ("AutomatedTeller", "Automated Teller (ATM)"),
            ("BankOrCreditUnion", "Bank or Credit Union"),
            ("InsuranceAgency", "Insurance Agency"),
        ],
    },
    TypeGroup {
        label: "Food & Drink",
        types: &[
            ("FoodEstablishment", "Food Establishment (General)"),
            ("Bakery", "Bakery"),
            ("BarOrPub", "Bar or Pub"),
            ("Brewery", "Brewery"),
            ("CafeOrCoffeeShop", "Cafe or Coffee Shop"),
            ("Distillery", "Distillery"),
            ("FastFoodRestaurant", "Fast Food Restaurant"),
            ("IceCreamShop", "Ice Cream Shop"),
            ("Restaurant", "Restaurant"),
            ("Winery", "Winery"),
        ],
    },
    TypeGroup {
        label: "Government & Public Service",
        types: &[
            ("GovernmentOffice", "Government Office (General)"),
            ("PostOffice", "Post Office"),
            ("Library", "Library"),
            ("RecyclingCenter", "Recycling Center"),
            ("TouristInformationCenter", "Tourist Information Center"),
        ],
    },
    TypeGroup {
        label: "Health & Beauty",
        types: &[
            ("HealthAndBeautyBusiness", "Health & Beauty Business (General)"),
            ("BeautySalon", "Beauty Salon"),
            ("DaySpa", "Day Spa"),
            ("HairSalon", "Hair Salon"),
            ("HealthClub", "Health Club"),
            ("NailSalon", "Nail Salon"),
            ("TattooParlor", "Tattoo Parlor"),
        ],
    },
    TypeGroup {
        label: "Home & Construction",
        types: &[
            ("HomeAndConstructionBusiness", "Home & Construction Business (General)"),
            ("Electrician", "Electrician"),
            ("GeneralContractor", "General Contractor"),
            ("HVACBusiness", "HVAC Business"),
            ("HousePainter", "House Painter"),
            ("Locksmith", "Locksmith"),
            ("MovingCompany", "Moving Company"),
            ("Plumber", "Plumber"),
            ("RoofingContractor", "Roofing Contractor"),
        ],
    },
    TypeGroup {
        label: "Legal Services",
        types: &[
            ("LegalService", "Legal Service (General)"),
            ("Attorney", "Attorney"),
            ("Notary", "Notary"),
        ],
    },
    TypeGroup {
        label: "Lodging",
        types: &[
            ("LodgingBusiness", "Lodging Business (General)"),
            ("BedAndBreakfast", "Bed And Breakfast"),
            ("Campground", "Campground"),
            ("Hostel", "Hostel"),
            ("Hotel", "Hotel"),
            ("Motel", "Motel"),
            ("Resort", "Resort"),
        ],
    },
    TypeGroup {
        label: "Medical & Healthcare",
        types: &[
            ("MedicalBusiness", "Medical Business (General)"),
            ("MedicalOrganization", "Medical Organization (General)"),
            ("CommunityHealth", "Community Health Center"),
            ("Dentist", "Dentist"),
            ("Dermatology", "Dermatology Clinic"),
            ("DietNutrition", "Diet & Nutrition Center"),
            ("Geriatric", "Geriatric Clinic"),
            ("Gynecologic", "Gynecologic Clinic"),
            ("MedicalClinic", "Medical Clinic"),
            ("Midwifery", "Midwifery Practice"),
            ("Nursing", "Nursing Home"),
            ("Obstetric", "Obstetric Clinic"),
            ("Oncologic", "Oncologic Clinic"),
            ("Optician", "Optician"),
            ("Optometric", "Optometric Clinic"),
            ("Otolaryngologic", "Otolaryngologic Clinic"),
            ("Pediatric", "Pediatric Clinic"),
            ("Pharmacy", "Pharmacy"),
            ("Physician", "Physician"),
            ("Physiotherapy", "Physiotherapy Clinic"),
            ("PlasticSurgery", "Plastic Surgery Clinic"),
        ],
    },
    TypeGroup {
        label: "Other Local Businesses",
        types: &[
            ("InternetCafe", "Internet Cafe"),
            ("PawnShop", "Pawn Shop"),
            ("ProfessionalService", "Professional Service (General)"),
            ("RadioStation", "Radio Station"),
            ("SelfStorage", "Self Storage"),
            ("ShoppingCenter", "Shopping Center"),
            ("TelevisionStation", "Television Station"),
            ("TravelAgency", "Travel Agency"),
            ("DryCleaningOrLaundry", "Dry Cleaning or Laundry"),
            ("EmploymentAgency", "Employment Agency"),
        ],
    },
    TypeGroup {
        label: "Sports & Recreation",
        types: &[
            ("SportsActivityLocation", "Sports Activity Location (General)"),
            ("BowlingAlley", "Bowling Alley"),
            ("ExerciseGym", "Exercise Gym"),
            ("GolfCourse", "Golf Course"),
            ("PublicSwimmingPool", "Public Swimming Pool"),
            ("SkiResort", "Ski Resort"),
            ("SportsClub", "Sports Club"),
            ("StadiumOrArena", "Stadium or Arena"),
            ("TennisComplex", "Tennis Complex"),
        ],
    },
    TypeGroup {
        label: "Stores",
        types: &[
            ("Store", "Store (General)"),
            ("BikeStore", "Bike Store"),
            ("BookStore", "Book Store"),
            ("ClothingStore", "Clothing Store"),
            ("ComputerStore", "Computer Store"),
            ("ConvenienceStore", "Convenience Store"),
            ("DepartmentStore", "Department Store"),
            ("ElectronicsStore", "Electronics Store"),
            ("Florist", "Florist"),
            ("FurnitureStore", "Furniture Store"),
            ("GardenStore", "Garden Store"),
            ("GroceryStore", "Grocery Store"),
            ("HardwareStore", "Hardware Store"),
            ("HobbyShop", "Hobby Shop"),
            ("HomeGoodsStore", "Home Goods Store"),
            ("JewelryStore", "Jewelry Store"),
            ("LiquorStore", "Liquor Store"),
            ("MensClothingStore", "Men's Clothing Store"),
            ("MobilePhoneStore", "Mobile Phone Store"),
            ("ShoeStore", "Shoe Store"),
            ("SportingGoodsStore", "Sporting Goods Store"),
            ("ToyStore", "Toy Store"),
            ("WholesaleStore", "Wholesale Store"),
        ],
    },
];

/// True if the business type gets cuisine, reservations and menu fields
pub fn is_food_type(business_type: &str) -> bool {
    FOOD_TYPES.contains(&business_type)
}

/// True if the type appears anywhere in the catalog
pub fn is_known_type(business_type: &str) -> bool {
    label_for(business_type).is_some()
}

/// Display label for a type, if it is in the catalog
pub fn label_for(business_type: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .flat_map(|g| g.types.iter())
        .find(|(t, _)| *t == business_type)
        .map(|(_, label)| *label)
}

/// Every catalog type in display order, without group headers
pub fn all_types() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().flat_map(|g| g.types.iter().map(|(t, _)| *t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_types() {
        assert!(is_food_type("Restaurant"));
        assert!(is_food_type("Winery"));
        assert!(!is_food_type("BookStore"));
        assert!(!is_food_type("restaurant"));
        assert!(!is_food_type(""));
    }

    #[test]
    fn test_food_types_match_food_group() {
        let group = CATALOG
            .iter()
            .find(|g| g.label == "Food & Drink")
            .unwrap();
        assert_eq!(group.types.len(), FOOD_TYPES.len());
        for (t, _) in group.types {
            assert!(is_food_type(t), "{} missing from FOOD_TYPES", t);
        }
    }

    #[test]
    fn test_catalog_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for t in all_types() {
            assert!(seen.insert(t), "duplicate catalog entry {}", t);
        }
    }

    #[test]
    fn test_label_for() {
        assert_eq!(label_for("AutomatedTeller"), Some("Automated Teller (ATM)"));
        assert_eq!(label_for("Spaceport"), None);
        assert!(is_known_type(DEFAULT_BUSINESS_TYPE));
    }
}
