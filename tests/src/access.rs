mod search_filter;
