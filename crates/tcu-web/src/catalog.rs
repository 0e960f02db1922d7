//! Static marketing content: products, testimonials, FAQs, blog posts.

pub struct Product {
    pub id: &'static str,
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub price: f64,
    pub features: &'static [(&'static str, &'static str)],
    pub gallery: &'static [(&'static str, &'static str)],
}

pub static PRODUCTS: &[Product] = &[
    Product {
        id: "TCD 24",
        slug: "tcd-24",
        name: "Smart Home Security Camera",
        description: "Smart Home Security Wifi Camera",
        image: "/assets/c6.jpg",
        price: 149.0,
        features: &[
            ("2K clarity", "Sharp 2K video keeps faces and plates readable."),
            ("Two-way audio", "Talk to visitors from anywhere through the app."),
        ],
        gallery: &[("/assets/c6.jpg", "Smart Home Security Camera - front view")],
    },
    Product {
        id: "TSE 22",
        slug: "tse-22",
        name: "Indoor/Outdoor Security Camera",
        description: "Tapo Indoor/Outdoor Wi-Fi Home Security Camera",
        image: "/assets/c7.png",
        price: 199.0,
        features: &[
            ("Weatherproof", "IP66 housing for rain, dust and heat."),
            ("Colour night vision", "Starlight sensor keeps colour after dark."),
        ],
        gallery: &[("/assets/c7.png", "Indoor/Outdoor Security Camera - mounted")],
    },
    Product {
        id: "TBE 22",
        slug: "tbe-22",
        name: "Video Doorbell",
        description: "Video Doorbell Camera",
        image: "/assets/c13.jpg",
        price: 129.0,
        features: &[
            (
                "2K 5MP starlight",
                "Always know what happens in front of your door. With the starlight sensor and 2K 5MP resolution, check all the fine details captured even in low-light environments.",
            ),
            ("Head-to-toe view", "A 160° diagonal field of view shows visitors and parcels."),
            ("Battery powered", "Months of use per charge, no wiring needed."),
        ],
        gallery: &[
            ("/assets/c13.jpg", "TCU Smart Battery Video Doorbell - features overview"),
            ("/assets/pd2.jpg", "TCU Smart Battery Video Doorbell - night vision demo"),
            ("/assets/pd3.jpg", "TCU Smart Battery Video Doorbell - field of view comparison"),
        ],
    },
    Product {
        id: "TYU 25",
        slug: "tyu-25",
        name: "Wireless AI Camera",
        description: "Wireless AI-powered Security Camera",
        image: "/assets/c9.png",
        price: 249.0,
        features: &[
            ("AI detection", "Tells people, vehicles and pets apart to cut false alerts."),
            ("Wire-free", "Rechargeable battery and Wi-Fi, mount it anywhere."),
        ],
        gallery: &[("/assets/c9.png", "Wireless AI Camera - side view")],
    },
];

pub fn find_product(slug: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.slug == slug)
}

pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub role: &'static str,
    pub rating: u8,
    pub image: &'static str,
}

pub static TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        quote: "The TCU 28 has transformed our home security. The AI tracking is incredibly accurate, and the 360° coverage leaves no blind spots. Highly recommended!",
        author: "James R.",
        role: "Homeowner",
        rating: 5,
        image: "/assets/cu1.jpg",
    },
    Testimonial {
        quote: "We installed TCU cameras at our storefront, and the real-time alerts have helped prevent theft. The facial recognition is a fantastic feature!",
        author: "Sophia M.",
        role: "Business Owner",
        rating: 5,
        image: "/assets/cu2.jpg",
    },
    Testimonial {
        quote: "As a property manager, I've installed TCU cameras across multiple buildings. The cloud storage and remote viewing capabilities make monitoring simple and effective.",
        author: "Michael T.",
        role: "Property Manager",
        rating: 5,
        image: "/assets/cu3.jpg",
    },
];

pub static FAQS: &[(&str, &str)] = &[
    (
        "Where is the location?",
        "Our main headquarters is located in Yangon, Myanmar. We also have satellite offices in several major cities across the region to better serve our customers.",
    ),
    (
        "How does your AI surveillance technology work?",
        "Our AI surveillance technology uses advanced computer vision algorithms and machine learning models to detect and track objects, recognize patterns, and identify unusual activities. The system processes video feeds in real-time and can alert users to potential security concerns.",
    ),
    (
        "What makes your cameras different from regular security cameras?",
        "Our AI-powered cameras offer intelligent features beyond traditional security cameras, including person detection, facial recognition (where legally permitted), unusual activity alerts, and integration with smart home systems. They also provide better video quality and more efficient storage options.",
    ),
    (
        "Do you offer installation services?",
        "Yes, we provide professional installation services for both residential and commercial customers. Our trained technicians will ensure your system is properly installed, configured, and optimized for your specific security needs.",
    ),
];

pub struct BlogPost {
    pub title: &'static str,
    pub date: &'static str,
    pub image: Option<&'static str>,
    pub paragraphs: &'static [&'static str],
}

pub static BLOG_POSTS: &[BlogPost] = &[
    BlogPost {
        title: "How AI is changing home security",
        date: "20250212",
        image: Some("/assets/b1.jpg"),
        paragraphs: &[
            "Cameras used to record everything and understand nothing. On-device AI now separates a delivery driver from a stray cat before an alert ever reaches your phone.",
            "Fewer false alarms means people actually look at the alerts they get, which is the whole point of a camera.",
        ],
    },
    BlogPost {
        title: "Choosing a camera for a small business",
        date: "20250128",
        image: None,
        paragraphs: &[
            "Start from what you need to see: the till, the door, the stockroom. Coverage beats resolution when budgets are tight.",
            "Cloud retention and multi-user access matter more for a shop than for a home; check both before buying.",
        ],
    },
];

pub static RELATED_NEWS: &[&str] = &[
    "S Korea removes Deepseek from...",
    "UK competition watchdog drops...",
    "Are Scottish students using AI t...",
];

pub static CORE_VALUES: &[(&str, &str)] = &[
    ("Reliability", "Cameras that keep recording when it matters."),
    ("Privacy", "Footage belongs to the customer, encrypted end to end."),
    ("Innovation", "AI features that reduce noise instead of adding it."),
];

pub static SOLUTIONS: &[(&str, &str)] = &[
    ("Homes", "Doorbells, indoor and outdoor cameras managed from one app."),
    ("Retail", "Storefront coverage with real-time theft alerts."),
    ("Property management", "Multi-building monitoring with shared cloud storage."),
    ("Warehouses", "Wide-area AI detection across loading bays and aisles."),
];

pub static ACHIEVEMENTS: &[(&str, &str)] = &[
    ("10K+", "Cameras installed"),
    ("500+", "Business customers"),
    ("24/7", "Support coverage"),
];

/// Fixed checkout order summary.
pub struct OrderSummary {
    pub product: &'static str,
    pub price: f64,
    pub subtotal: f64,
    pub vat: f64,
    pub total: f64,
}

pub static ORDER_SUMMARY: OrderSummary = OrderSummary {
    product: "TCU-28 Indoor Camera",
    price: 999.98,
    subtotal: 999.69,
    vat: 1.3,
    total: 999.98,
};
