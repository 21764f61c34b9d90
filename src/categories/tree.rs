//! The store taxonomy used for category suggestions and AI category picks.

use super::CategoryNode;

const fn leaf(name: &'static str, keywords: &'static [&'static str]) -> CategoryNode {
    CategoryNode {
        name,
        keywords,
        children: &[],
    }
}

pub(super) static CATEGORY_TREE: &[CategoryNode] = &[
    CategoryNode {
        name: "Arborist Equipment",
        keywords: &["arborist", "tree", "climbing", "rigging", "rope"],
        children: &[
            leaf("Accessories", &["accessory", "accessories"]),
            leaf("Arborist Machinery", &["arborist machinery", "winch"]),
            leaf("Arborist Ropes - Climbing & Lowering", &["rope", "climbing rope", "lowering rope"]),
            leaf("Ascenders and Descenders", &["ascender", "descender"]),
            leaf("Books and Literature for Tree Workers", &["book", "literature", "guide"]),
            leaf("Cambium Savers", &["cambium", "saver"]),
            leaf("Climbing Carabiners and Connectors", &["carabiner", "connector", "karabiner"]),
            leaf("Climbing Gloves", &["climbing glove"]),
            leaf("Climbing Kit Bags", &["kit bag", "climbing bag", "rope bag"]),
            leaf("Fall Arresters", &["fall arrest", "fall protection"]),
            leaf("Fliplines, Lanyards & Accessories", &["flipline", "lanyard", "work positioning"]),
            leaf("Lifting Slings", &["lifting sling", "sling"]),
            leaf("Lowering Devices", &["lowering device", "bollard", "portawrap"]),
            leaf("Prusik Rope - Accessory Cords and Slings", &["prusik", "accessory cord", "sling"]),
            leaf("Pulleys", &["pulley", "block"]),
            leaf("Rigging", &["rigging", "rigging plate", "ring"]),
            leaf("Spare Parts", &["spare", "replacement part"]),
            leaf("Swivels", &["swivel"]),
            leaf("Throw lines - Bags and Catapults", &["throw line", "throwline", "throw bag", "catapult", "big shot"]),
            leaf("Tool Strops", &["tool strop", "strop", "tool lanyard"]),
            leaf("Tree Climbing Harnesses", &["harness", "climbing harness", "saddle"]),
            leaf("Tree Climbing Spikes", &["climbing spike", "spike", "gaff", "spur"]),
        ],
    },
    CategoryNode {
        name: "Brand",
        keywords: &[],
        children: &[
            leaf("Bayer Garden", &["bayer"]),
            leaf("Castle Clothing", &["castle"]),
            leaf("Cofra", &["cofra"]),
            leaf("DeWalt", &["dewalt"]),
            leaf("DMM", &["dmm"]),
            leaf("Duracell", &["duracell"]),
            leaf("Forgefix", &["forgefix"]),
            leaf("Gripple", &["gripple"]),
            leaf("Matabi", &["matabi"]),
            leaf("Rutland Electric Fencing", &["rutland"]),
            leaf("Viking", &["viking"]),
            leaf("Weedol", &["weedol"]),
            leaf("Wilkinson Sword", &["wilkinson"]),
        ],
    },
    leaf("CLEARANCE", &["clearance", "sale", "discount"]),
    CategoryNode {
        name: "Clothing and Merchandise",
        keywords: &["clothing", "merch", "apparel", "wear"],
        children: &[
            leaf("Clothing", &["clothing", "clothes"]),
            leaf("Hats and Baseball Caps", &["hat", "cap", "baseball cap"]),
            leaf("Hoodies and Jumpers", &["hoodie", "jumper", "sweatshirt"]),
            leaf("Jackets", &["jacket", "coat"]),
            leaf("Novelty Plaques", &["plaque", "novelty", "sign"]),
            leaf("Stihl Kids", &["stihl kids", "children"]),
            leaf("STIHL Merchandise", &["stihl merch", "stihl merchandise"]),
            leaf("T-Shirts", &["t-shirt", "tshirt", "tee"]),
        ],
    },
    CategoryNode {
        name: "Fencing and Landscaping",
        keywords: &["fence", "fencing", "landscape", "landscaping", "garden"],
        children: &[
            leaf("Aggregates & Garden Gravel", &["aggregate", "gravel", "stone", "pebble"]),
            leaf("Agricultural Farm Fencing", &["agricultural fence", "farm fence"]),
            leaf("Artificial Grass", &["artificial grass", "fake grass", "astro"]),
            leaf("Chainlink Fencing", &["chainlink", "chain link"]),
            leaf("Cladding", &["cladding", "clad"]),
            leaf("Closeboard Fencing", &["closeboard", "close board"]),
            leaf("Composite Decking", &["composite deck", "composite board"]),
            leaf("Concrete Fencing", &["concrete fence", "concrete post"]),
            leaf("Decking Supplies", &["decking", "deck board", "deck screw", "joist"]),
            leaf("Durapost Fencing", &["durapost"]),
            leaf("Electric Fencing", &["electric fence", "energiser", "electric fencing"]),
            leaf("Fence Panels", &["fence panel", "panel"]),
            leaf("Fence Post Caps and Finials", &["post cap", "finial"]),
            leaf("Fence Posts", &["fence post", "timber post"]),
            leaf("Fencing Accessories", &["fencing accessories", "post fix", "bracket"]),
            leaf("Gates", &["gate", "garden gate", "side gate"]),
            leaf("Gravel Boards", &["gravel board"]),
            leaf("Landscaping and Fencing Tools", &["landscaping tool", "fencing tool", "post hole"]),
            leaf("Paving", &["paving", "patio", "slab"]),
            leaf("Picket Fence Materials", &["picket", "picket fence"]),
            leaf("Post and Rail Fence", &["post and rail", "rail fence"]),
            leaf("Postcrete and Cement", &["postcrete", "cement", "concrete mix"]),
            leaf("Rails", &["rail", "arris rail"]),
            leaf("Sheds and Structures", &["shed", "summerhouse", "log cabin", "structure"]),
            leaf("Sleepers", &["sleeper", "railway sleeper"]),
            leaf("Trellis Panels", &["trellis"]),
            leaf("Wire and Stock Fencing", &["wire fence", "stock fence", "wire mesh"]),
            leaf("Wood Treatments and Preservatives", &["wood treatment", "preservative", "stain", "oil", "protector"]),
            leaf("Wooden Stakes and Round Rails", &["stake", "round rail", "wooden stake"]),
        ],
    },
    CategoryNode {
        name: "Forestry & Agricultural",
        keywords: &["forestry", "agricultural", "woodland", "tree felling"],
        children: &[
            leaf("Agricultural Tools", &["agricultural tool"]),
            leaf("Billhooks - Hedge Laying Tools", &["billhook", "hedge laying"]),
            leaf("Hay and Manure Forks", &["hay fork", "manure fork", "pitchfork"]),
            leaf("Scythes", &["scythe"]),
            leaf("Slashers", &["slasher"]),
            leaf("Axes", &["axe", "splitting axe", "felling axe", "hatchet"]),
            leaf("Chainsaw Mills for Timber Milling", &["chainsaw mill", "timber mill", "milling", "alaskan"]),
            leaf("Drag Tools", &["drag tool", "log drag", "timber jack", "cant hook", "peavey"]),
            leaf("Felling Wedges", &["felling wedge", "wedge"]),
            leaf("Forestry Accessories", &["forestry accessory"]),
            leaf("Measuring - Surveying and Marking out", &["measuring", "survey", "marking", "tape", "diameter"]),
            leaf("Replacement Handles", &["replacement handle", "handle"]),
            leaf("Saw Horses", &["saw horse", "sawhorse", "log horse"]),
            leaf("Sawpod", &["sawpod"]),
            leaf("SILKY Saws", &["silky", "silky saw"]),
        ],
    },
    CategoryNode {
        name: "Garden Machinery",
        keywords: &["machinery", "machine", "engine", "motor", "power tool"],
        children: &[
            leaf("Augers and Accessories", &["auger", "earth auger", "post hole borer"]),
            CategoryNode {
                name: "Chainsaws and Accessories",
                keywords: &["chainsaw"],
                children: &[
                    leaf("Chainsaw Accessories", &["chainsaw accessory", "chainsaw case", "chainsaw bag"]),
                    leaf("Chainsaw Bar & Chain Cut-Kits", &["cut kit", "bar and chain", "bar & chain"]),
                    leaf("Chainsaw Guide Bars", &["guide bar", "chainsaw bar"]),
                    CategoryNode {
                        name: "Chainsaw Chains",
                        keywords: &["chainsaw chain", "chain"],
                        children: &[
                            leaf("Full Chisel Chains", &["full chisel"]),
                            leaf("Milling Chains", &["milling chain", "ripping chain"]),
                            leaf("Semi Chisel Chains", &["semi chisel"]),
                        ],
                    },
                    leaf("Cordless Chainsaws", &["cordless chainsaw", "battery chainsaw"]),
                    leaf("Electric Chainsaws", &["electric chainsaw"]),
                    leaf("Petrol Chainsaws for Agriculture", &["petrol chainsaw agriculture", "farm chainsaw"]),
                    leaf("Petrol Chainsaws for Domestic Use", &["petrol chainsaw domestic", "home chainsaw"]),
                    leaf("Petrol Chainsaws for Forestry", &["petrol chainsaw forestry", "professional chainsaw"]),
                    leaf("Professional Arborist Chainsaws", &["arborist chainsaw", "top handle chainsaw"]),
                ],
            },
            leaf("Chipper Shredders", &["chipper", "shredder", "garden shredder"]),
            leaf("Construction", &["construction", "cut off saw", "disc cutter"]),
            CategoryNode {
                name: "Consumables",
                keywords: &["consumable"],
                children: &[
                    leaf("Engine Oils", &["engine oil", "2 stroke oil", "two stroke", "4 stroke oil", "chain oil"]),
                    leaf("Files and Handles", &["file", "chainsaw file", "round file", "flat file"]),
                    leaf("Lubricants & Cleaners", &["lubricant", "cleaner", "resin", "degreaser"]),
                    leaf("Pre Mixed Fuel", &["pre mixed fuel", "premixed", "aspen", "motomix"]),
                    leaf("Service Kits", &["service kit", "tune up kit", "maintenance kit"]),
                ],
            },
            CategoryNode {
                name: "Trimmer Line & Blades",
                keywords: &["trimmer line", "strimmer line", "trimmer blade"],
                children: &[
                    leaf("AutoCut Heads", &["autocut"]),
                    leaf("Brushcutter Blades", &["brushcutter blade", "brush cutter blade"]),
                    leaf("DuroCut Heads", &["durocut"]),
                    leaf("Polycut Blades & Heads", &["polycut"]),
                    leaf("Supercut Heads", &["supercut"]),
                    leaf("Trimmer Line", &["trimmer line", "strimmer line", "nylon line"]),
                    leaf("Trimmer Spools", &["trimmer spool", "spool"]),
                ],
            },
            CategoryNode {
                name: "Cordless Garden Machinery",
                keywords: &["cordless", "battery"],
                children: &[
                    leaf("Cordless Accessories", &["cordless accessory", "battery", "charger"]),
                    leaf("Hayter & Toro Cordless", &["hayter cordless", "toro cordless"]),
                    leaf("Honda Cordless", &["honda cordless"]),
                    leaf("STIHL AI Line - Small Gardens", &["stihl ai", "ai system"]),
                    leaf("STIHL AK - Sm, Med & Lge Gardens", &["stihl ak", "ak system"]),
                    leaf("STIHL AP - Large Gardens & Professional", &["stihl ap", "ap system"]),
                    leaf("STIHL AS - Small Handheld", &["stihl as", "as system"]),
                ],
            },
            leaf("Garden Machinery Sale", &["machinery sale"]),
            CategoryNode {
                name: "Grass Trimmers and Brushcutters",
                keywords: &["trimmer", "brushcutter", "strimmer", "grass trimmer"],
                children: &[
                    leaf("Bike Handle Brushcutters", &["bike handle", "bull handle"]),
                    leaf("Cordless Trimmers & Brushcutters", &["cordless trimmer", "battery trimmer"]),
                    leaf("Electric Grass Trimmers", &["electric trimmer"]),
                    leaf("Loop Handle Grass Trimmers", &["loop handle"]),
                    leaf("Professional Back Pack Brushcutters", &["backpack brushcutter", "back pack"]),
                    leaf("Professional Clearing Saws", &["clearing saw"]),
                    leaf("Wheeled Grass Trimmers", &["wheeled trimmer"]),
                ],
            },
            leaf("Hedge Trimmers", &["hedge trimmer", "hedge cutter"]),
            leaf("Kombi System - Stihl", &["kombi", "kombisystem", "kombi tool"]),
            leaf("Lawn Mowers", &["lawn mower", "mower", "lawnmower"]),
            CategoryNode {
                name: "Lawn Mowers - Robotic",
                keywords: &["robotic mower", "robot mower", "automower", "imow"],
                children: &[
                    leaf("Robotic Mower Accessories", &["robotic mower accessory", "robotic accessory"]),
                    leaf("Robotic Mowers", &["robotic mower", "robot mower"]),
                ],
            },
            leaf("Leaf Blowers and Vacuum Shredders", &["leaf blower", "blower", "vacuum shredder", "garden vac"]),
            leaf("Log Splitters", &["log splitter", "wood splitter"]),
            CategoryNode {
                name: "Machine Accessories",
                keywords: &["machine accessory"],
                children: &[
                    leaf("Grass Trimmer & Brushcutter Accessories", &["trimmer accessory", "guard", "shoulder harness"]),
                    leaf("Hedge Trimmer Accessories", &["hedge trimmer accessory"]),
                    leaf("Maintenance Tools and Accessories", &["maintenance tool", "grease gun", "spark plug wrench"]),
                ],
            },
            leaf("Mixers - Cement Mixers", &["mixer", "cement mixer", "concrete mixer", "belle"]),
            leaf("Multi System - Stihl", &["multi system", "multisystem"]),
            leaf("Petrol Post Driver", &["post driver", "post knocker", "post rammer"]),
            leaf("Pole Pruners", &["pole pruner", "pole saw", "high pruner"]),
            CategoryNode {
                name: "Pressure Washers",
                keywords: &["pressure washer", "power washer", "jet wash"],
                children: &[
                    leaf("Electric Pressure Washers", &["electric pressure washer"]),
                    leaf("Pressure Washer Attachments", &["pressure washer attachment", "lance", "nozzle", "surface cleaner"]),
                    leaf("Pressure Washer Fluids", &["pressure washer fluid", "detergent", "cleaning fluid"]),
                ],
            },
            leaf("Scarifiers", &["scarifier", "lawn scarifier"]),
            CategoryNode {
                name: "Spares and Parts",
                keywords: &["spare", "part", "replacement"],
                children: &[
                    leaf("Briggs & Stratton Parts", &["briggs", "stratton"]),
                    leaf("Hayter Parts", &["hayter part"]),
                    leaf("Honda Parts", &["honda part"]),
                    leaf("Kawasaki Parts", &["kawasaki"]),
                    leaf("MTD Parts", &["mtd"]),
                    leaf("Sharpening/Grinding Parts", &["sharpening", "grinding", "grinder"]),
                    leaf("Spark Plugs", &["spark plug", "ngk", "bosch plug"]),
                    leaf("Toro Parts", &["toro part"]),
                    leaf("Wheelbarrow Parts", &["wheelbarrow part", "barrow wheel", "barrow tyre"]),
                ],
            },
            leaf("Spreaders", &["spreader", "fertiliser spreader", "salt spreader"]),
            leaf("Tillers and Rotovators", &["tiller", "rotovator", "rotavator", "cultivator"]),
            leaf("Versatool system - Honda", &["versatool", "honda versatool"]),
            leaf("Wet and Dry Vacuum Cleaners", &["wet and dry", "vacuum cleaner", "shop vac"]),
        ],
    },
    CategoryNode {
        name: "Gardening Products",
        keywords: &["garden", "gardening"],
        children: &[
            leaf("Bins and Incinerators", &["bin", "incinerator", "garden bin"]),
            leaf("Compost and Bark", &["compost", "bark", "mulch", "soil"]),
            leaf("Digging Tools", &["digging", "spade", "fork", "shovel"]),
            leaf("Garden Sundries", &["sundries", "garden sundry", "twine", "tie"]),
            leaf("Garden Tool and Blade Sharpening", &["sharpening", "sharpener", "whetstone"]),
            leaf("Hoses - Watering and Sprayers", &["hose", "watering", "sprayer", "spray"]),
            leaf("Landscape Fabrics and Fruit Cage Netting", &["landscape fabric", "weed membrane", "netting", "fruit cage"]),
            leaf("Pest Control", &["pest control", "mouse", "rat", "trap", "mole"]),
            leaf("Plant Feeds and Lawn Care", &["plant feed", "lawn feed", "fertiliser", "lawn care", "grass seed"]),
            CategoryNode {
                name: "Pruning Tools",
                keywords: &["pruning", "prune", "cut"],
                children: &[
                    leaf("Extending Pole Saws", &["pole saw", "extending saw"]),
                    leaf("Hedge & Lawn Shears", &["hedge shear", "lawn shear", "shears"]),
                    leaf("Loppers", &["lopper", "loppers"]),
                    leaf("Pruning Saws", &["pruning saw", "folding saw"]),
                    leaf("Secateurs", &["secateur", "secateurs", "bypass", "anvil"]),
                ],
            },
            leaf("Rakes - Brooms and Brushes", &["rake", "broom", "brush", "leaf rake"]),
            leaf("Replacement Tree Lopper Springs and Parts", &["lopper spring", "lopper part", "replacement spring"]),
            leaf("Sacks and Bags", &["sack", "rubble sack", "garden bag", "tonne bag"]),
            leaf("Tree Guards and Ties", &["tree guard", "tree tie", "tree shelter", "spiral guard"]),
            leaf("Weed Killers and Tree Stump Killers", &["weed killer", "herbicide", "stump killer", "roundup", "glyphosate"]),
            leaf("Wheel Barrows", &["wheelbarrow", "barrow"]),
            leaf("Wolf Garten Tools", &["wolf garten", "wolf-garten", "multi-star"]),
        ],
    },
    CategoryNode {
        name: "Hardware and DIY",
        keywords: &["hardware", "diy", "fixing", "screw", "nail"],
        children: &[
            leaf("Clips and Brackets for Fencing", &["clip", "bracket", "fence clip"]),
            leaf("DIY Tools", &["diy tool", "hand tool"]),
            leaf("Drill & Screwdriver Bits", &["drill bit", "screwdriver bit", "driver bit"]),
            leaf("Farm and Entrance Gate Fixings", &["gate fixing", "hinge", "latch", "gate furniture"]),
            leaf("Glue and Adhesive Tape", &["glue", "adhesive", "tape", "sealant"]),
            leaf("Hinges and Latches for Garden Gates", &["hinge", "latch", "gate hinge", "t-hinge"]),
            CategoryNode {
                name: "Ladders",
                keywords: &["ladder"],
                children: &[
                    leaf("Access and Work Platforms", &["platform", "scaffold", "work platform"]),
                    leaf("Combination Ladders", &["combination ladder"]),
                    leaf("Extending Ladders", &["extending ladder", "extension ladder"]),
                    leaf("Lightweight Tripod Ladder", &["tripod ladder"]),
                    leaf("Platform Steps", &["platform step", "step ladder"]),
                ],
            },
            leaf("Masonry Fixings", &["masonry", "wall plug", "anchor", "rawl"]),
            leaf("Miscellaneous", &["misc", "miscellaneous"]),
            leaf("Padlocks and Locking Bolts", &["padlock", "lock", "locking bolt"]),
            leaf("Screws - Nails - Bolts and Staples", &["screw", "nail", "bolt", "staple", "coach bolt"]),
            leaf("Sheet Roofing & Accessories", &["roofing", "corrugated", "bitumen", "roof sheet"]),
        ],
    },
    leaf("Mauls and Hatchets", &["maul", "hatchet", "splitting maul", "kindling"]),
    leaf("Milwaukee", &["milwaukee", "m18", "m12"]),
    CategoryNode {
        name: "PPE & Safety",
        keywords: &["ppe", "safety", "protection", "protective"],
        children: &[
            leaf("Arborist Climbing Helmets", &["climbing helmet", "arborist helmet", "tree helmet", "petzl", "kask"]),
            leaf("Brushcutter Trousers", &["brushcutter trouser"]),
            CategoryNode {
                name: "Chainsaw Protective Clothing",
                keywords: &["chainsaw protective", "chainsaw clothing"],
                children: &[
                    leaf("Chainsaw Boots", &["chainsaw boot"]),
                    leaf("Chainsaw Gloves", &["chainsaw glove"]),
                    leaf("Chainsaw Trousers", &["chainsaw trouser", "class 1", "class 2", "type a", "type c"]),
                ],
            },
            leaf("Ear Protection", &["ear protection", "ear defender", "ear muff", "ear plug", "hearing"]),
            leaf("First Aid", &["first aid", "first aid kit", "plaster", "bandage"]),
            leaf("Footwear and Accessories", &["footwear", "boot", "shoe", "wellington", "safety boot"]),
            leaf("Gloves", &["glove", "work glove", "rigger"]),
            leaf("Ground working helmets", &["ground helmet", "hard hat", "safety helmet"]),
            leaf("Hi Vis Clothing", &["hi vis", "high visibility", "hi-vis", "hiviz", "fluorescent"]),
            leaf("Insulated Digging Tools", &["insulated", "insulated tool"]),
            leaf("Safety Glasses", &["safety glasses", "safety goggles", "eye protection"]),
            leaf("Safety Signs", &["safety sign", "warning sign"]),
            leaf("Torches & Headlamps", &["torch", "headlamp", "flashlight", "head torch"]),
        ],
    },
    leaf("Professional Lawn Mowers", &["professional mower", "commercial mower"]),
    leaf("Real Deals for You", &["real deal", "offer", "bundle"]),
    leaf("Safety Signs & PPE", &["safety sign", "ppe sign"]),
    CategoryNode {
        name: "Seasonal Products",
        keywords: &["seasonal", "winter", "summer"],
        children: &[
            leaf("Charcoal and BBQ", &["charcoal", "bbq", "barbecue", "briquette"]),
            leaf("Coal and Logs", &["coal", "log", "firewood", "kindling", "smokeless"]),
            leaf("Ice Scrapers", &["ice scraper"]),
            leaf("Rock Salt", &["rock salt", "grit", "de-icing salt"]),
            leaf("Screenwash and De Icer", &["screenwash", "de-icer", "deicer", "antifreeze"]),
        ],
    },
];
